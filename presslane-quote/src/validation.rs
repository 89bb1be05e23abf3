use serde::{Deserialize, Serialize};
use uuid::Uuid;

use presslane_catalog::{ProductClass, ProductConfiguration, Sides};
use presslane_core::units::Dimensions;

use crate::selections::{ConfigSelections, SizeSelection};

/// A configuration the customer picked that cannot be produced.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ValidationError {
    #[error("quantity {0} is not offered for this product")]
    QuantityNotOffered(u32),

    #[error("size '{0}' is not offered for this product")]
    SizeNotOffered(String),

    #[error("invalid custom size: {0}")]
    InvalidCustomSize(String),

    #[error("paper stock {0} is not offered for this product")]
    PaperNotOffered(Uuid),

    #[error("paper stock '{0}' is no longer available")]
    PaperInactive(String),

    #[error("coating '{0}' is not offered on the selected paper stock")]
    CoatingNotOffered(String),

    #[error("a coating choice is required for the selected paper stock")]
    CoatingRequired,

    #[error("paper stock '{0}' cannot be printed double-sided")]
    SidesUnsupported(String),

    #[error("add-on {0} is not offered for this product")]
    AddonNotOffered(Uuid),

    #[error("add-on '{0}' is no longer available")]
    AddonInactive(String),

    #[error("turnaround {0} is not offered for this product")]
    TurnaroundNotOffered(Uuid),

    #[error("constraint violated: {0}")]
    ConstraintViolated(String),
}

/// Condition half of a configuration constraint rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleCondition {
    AddonSelected(String),
    ProductClass(ProductClass),
    Sides(Sides),
    MinQuantity(u32),
}

/// Effect half of a configuration constraint rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleAction {
    /// The configuration must carry this coating code.
    RequireCoating(String),
    /// This add-on code cannot be combined with the matched conditions.
    ExcludeAddon(String),
    /// The configuration must use this paper stock.
    RequirePaperStock(Uuid),
}

/// A compatibility rule over the configured option set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigRule {
    pub name: String,
    pub conditions: Vec<RuleCondition>,
    pub actions: Vec<RuleAction>,
    pub priority: i32,
    pub is_active: bool,
}

/// Evaluates constraint rules against a validated selection.
pub struct ConstraintEngine {
    rules: Vec<ConfigRule>,
}

/// Snapshot of the facts rules are matched against.
struct RuleContext<'a> {
    product_class: &'a ProductClass,
    sides: Sides,
    quantity: u32,
    paper_stock_id: Uuid,
    addon_codes: Vec<&'a str>,
    coating_code: Option<&'a str>,
}

impl ConstraintEngine {
    pub fn new(rules: Vec<ConfigRule>) -> Self {
        let mut rules = rules;
        rules.sort_by_key(|r| -r.priority);
        Self { rules }
    }

    /// Check every active rule; the first violation wins.
    fn check(&self, ctx: &RuleContext<'_>) -> Result<(), ValidationError> {
        for rule in &self.rules {
            if !rule.is_active {
                continue;
            }
            if !self.matches(rule, ctx) {
                continue;
            }
            for action in &rule.actions {
                match action {
                    RuleAction::RequireCoating(code) => {
                        if ctx.coating_code != Some(code.as_str()) {
                            return Err(ValidationError::ConstraintViolated(format!(
                                "{}: coating '{}' is required",
                                rule.name, code
                            )));
                        }
                    }
                    RuleAction::ExcludeAddon(code) => {
                        if ctx.addon_codes.contains(&code.as_str()) {
                            return Err(ValidationError::ConstraintViolated(format!(
                                "{}: add-on '{}' cannot be combined with this configuration",
                                rule.name, code
                            )));
                        }
                    }
                    RuleAction::RequirePaperStock(id) => {
                        if ctx.paper_stock_id != *id {
                            return Err(ValidationError::ConstraintViolated(format!(
                                "{}: a specific paper stock is required",
                                rule.name
                            )));
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn matches(&self, rule: &ConfigRule, ctx: &RuleContext<'_>) -> bool {
        for condition in &rule.conditions {
            match condition {
                RuleCondition::AddonSelected(code) => {
                    if !ctx.addon_codes.contains(&code.as_str()) {
                        return false;
                    }
                }
                RuleCondition::ProductClass(class) => {
                    if ctx.product_class != class {
                        return false;
                    }
                }
                RuleCondition::Sides(sides) => {
                    if ctx.sides != *sides {
                        return false;
                    }
                }
                RuleCondition::MinQuantity(min) => {
                    if ctx.quantity < *min {
                        return false;
                    }
                }
            }
        }
        true
    }
}

/// Rules every shop starts with; product-specific rules layer on top.
pub fn default_rules() -> Vec<ConfigRule> {
    vec![
        ConfigRule {
            name: "Foil blocks QR overprint".to_string(),
            priority: 100,
            is_active: true,
            conditions: vec![RuleCondition::AddonSelected("FOIL".to_string())],
            actions: vec![RuleAction::ExcludeAddon("QR_CODE".to_string())],
        },
        ConfigRule {
            name: "Raised spot UV needs gloss".to_string(),
            priority: 90,
            is_active: true,
            conditions: vec![RuleCondition::AddonSelected("SPOT_UV".to_string())],
            actions: vec![RuleAction::RequireCoating("UV".to_string())],
        },
    ]
}

/// Validate a selection against a product's resolved option set.
///
/// Runs entirely before pricing; returns the resolved trim dimensions so the
/// calculator never re-parses the size.
pub fn validate(
    config: &ProductConfiguration,
    selections: &ConfigSelections,
    constraints: &ConstraintEngine,
) -> Result<Dimensions, ValidationError> {
    // Quantity
    if !config.quantity_group.permits(selections.quantity) {
        return Err(ValidationError::QuantityNotOffered(selections.quantity));
    }

    // Size
    let dims = match &selections.size {
        SizeSelection::Preset { name } => {
            let preset = config
                .size_group
                .preset(name)
                .ok_or_else(|| ValidationError::SizeNotOffered(name.clone()))?;
            preset
                .dimensions()
                .map_err(|e| ValidationError::InvalidCustomSize(e.to_string()))?
        }
        SizeSelection::Custom { width_in, height_in } => config
            .size_group
            .resolve_custom(*width_in, *height_in)
            .map_err(|e| ValidationError::InvalidCustomSize(e.to_string()))?,
    };

    // Paper stock, coating, sides
    if !config
        .product
        .paper_stock_ids
        .contains(&selections.paper_stock_id)
    {
        return Err(ValidationError::PaperNotOffered(selections.paper_stock_id));
    }
    let paper = config
        .paper_stock(selections.paper_stock_id)
        .map_err(|_| ValidationError::PaperNotOffered(selections.paper_stock_id))?;
    if !paper.is_active {
        return Err(ValidationError::PaperInactive(paper.name.clone()));
    }
    match &selections.coating_code {
        Some(code) => {
            if paper.coating(code).is_none() {
                return Err(ValidationError::CoatingNotOffered(code.clone()));
            }
        }
        None => {
            if !paper.available_coatings.is_empty() {
                return Err(ValidationError::CoatingRequired);
            }
        }
    }
    if selections.sides == Sides::Double && paper.single_sided_only {
        return Err(ValidationError::SidesUnsupported(paper.name.clone()));
    }

    // Add-ons
    let mut addon_codes = Vec::with_capacity(selections.addon_ids.len());
    for addon_id in &selections.addon_ids {
        if !config.product.addon_ids.contains(addon_id) {
            return Err(ValidationError::AddonNotOffered(*addon_id));
        }
        let addon = config
            .addon(*addon_id)
            .map_err(|_| ValidationError::AddonNotOffered(*addon_id))?;
        if !addon.is_active {
            return Err(ValidationError::AddonInactive(addon.name.clone()));
        }
        addon_codes.push(addon.code.as_str());
    }

    // Turnaround
    if let Some(turnaround_id) = selections.turnaround_id {
        if !config.product.turnaround_ids.contains(&turnaround_id) {
            return Err(ValidationError::TurnaroundNotOffered(turnaround_id));
        }
    }

    // Constraint rules last: they assume the individual picks are valid.
    constraints.check(&RuleContext {
        product_class: &config.product.product_class,
        sides: selections.sides,
        quantity: selections.quantity,
        paper_stock_id: selections.paper_stock_id,
        addon_codes,
        coating_code: selections.coating_code.as_deref(),
    })?;

    Ok(dims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx<'a>(addons: Vec<&'a str>, coating: Option<&'a str>) -> RuleContext<'a> {
        RuleContext {
            product_class: &ProductClass::BusinessCard,
            sides: Sides::Double,
            quantity: 500,
            paper_stock_id: Uuid::nil(),
            addon_codes: addons,
            coating_code: coating,
        }
    }

    #[test]
    fn test_exclude_addon_rule() {
        let engine = ConstraintEngine::new(vec![ConfigRule {
            name: "no foil with qr".to_string(),
            priority: 10,
            is_active: true,
            conditions: vec![RuleCondition::AddonSelected("FOIL".to_string())],
            actions: vec![RuleAction::ExcludeAddon("QR_CODE".to_string())],
        }]);

        assert!(engine.check(&ctx(vec!["FOIL"], None)).is_ok());
        assert!(engine.check(&ctx(vec!["QR_CODE"], None)).is_ok());
        assert!(engine.check(&ctx(vec!["FOIL", "QR_CODE"], None)).is_err());
    }

    #[test]
    fn test_require_coating_rule() {
        let engine = ConstraintEngine::new(vec![ConfigRule {
            name: "spot uv needs gloss".to_string(),
            priority: 10,
            is_active: true,
            conditions: vec![RuleCondition::AddonSelected("SPOT_UV".to_string())],
            actions: vec![RuleAction::RequireCoating("UV".to_string())],
        }]);

        assert!(engine.check(&ctx(vec!["SPOT_UV"], Some("UV"))).is_ok());
        assert!(engine.check(&ctx(vec!["SPOT_UV"], Some("MATTE"))).is_err());
        assert!(engine.check(&ctx(vec!["SPOT_UV"], None)).is_err());
    }

    #[test]
    fn test_inactive_rules_are_skipped() {
        let engine = ConstraintEngine::new(vec![ConfigRule {
            name: "disabled".to_string(),
            priority: 10,
            is_active: false,
            conditions: vec![],
            actions: vec![RuleAction::ExcludeAddon("FOIL".to_string())],
        }]);
        assert!(engine.check(&ctx(vec!["FOIL"], None)).is_ok());
    }

    #[test]
    fn test_require_paper_stock_rule() {
        let stock_id = Uuid::new_v4();
        let engine = ConstraintEngine::new(vec![ConfigRule {
            name: "metallic ink needs coated stock".to_string(),
            priority: 10,
            is_active: true,
            conditions: vec![RuleCondition::AddonSelected("METALLIC".to_string())],
            actions: vec![RuleAction::RequirePaperStock(stock_id)],
        }]);

        let mut matching = ctx(vec!["METALLIC"], None);
        matching.paper_stock_id = stock_id;
        assert!(engine.check(&matching).is_ok());

        assert!(engine.check(&ctx(vec!["METALLIC"], None)).is_err());
    }

    #[test]
    fn test_min_quantity_condition() {
        let engine = ConstraintEngine::new(vec![ConfigRule {
            name: "bulk runs skip foil".to_string(),
            priority: 10,
            is_active: true,
            conditions: vec![RuleCondition::MinQuantity(1000)],
            actions: vec![RuleAction::ExcludeAddon("FOIL".to_string())],
        }]);

        // Quantity 500 in ctx() is below the threshold.
        assert!(engine.check(&ctx(vec!["FOIL"], None)).is_ok());

        let mut big = ctx(vec!["FOIL"], None);
        big.quantity = 2500;
        assert!(engine.check(&big).is_err());
    }
}
