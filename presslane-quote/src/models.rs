use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Quote status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteStatus {
    Active,
    Expired,
    Converted,
    Cancelled,
}

/// What a quote line charges for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineKind {
    Production,
    Addon,
    Tax,
}

/// A single charge on a quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteLine {
    pub kind: LineKind,
    pub label: String,
    pub amount_cents: i64,
}

/// A priced print-job configuration presented to the customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub id: Uuid,
    /// Short human code for support calls, e.g. "Q-7G2KX9AD".
    pub reference: String,
    pub product_id: Uuid,
    pub lines: Vec<QuoteLine>,
    /// Production + add-ons, before tax.
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub total_cents: i64,
    pub unit_price_cents: i64,
    pub total_weight_lbs: f64,
    pub turnaround_days: u32,
    pub status: QuoteStatus,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Quote {
    /// Create an empty quote that expires `ttl_seconds` from now.
    pub fn new(product_id: Uuid, ttl_seconds: u64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            reference: generate_reference(),
            product_id,
            lines: Vec::new(),
            subtotal_cents: 0,
            tax_cents: 0,
            total_cents: 0,
            unit_price_cents: 0,
            total_weight_lbs: 0.0,
            turnaround_days: 0,
            status: QuoteStatus::Active,
            expires_at: now + chrono::Duration::seconds(ttl_seconds as i64),
            created_at: now,
        }
    }

    /// Add a pre-tax charge, keeping the subtotal consistent.
    pub fn add_line(&mut self, kind: LineKind, label: impl Into<String>, amount_cents: i64) {
        debug_assert!(kind != LineKind::Tax, "tax is set via set_tax");
        self.subtotal_cents += amount_cents;
        self.lines.push(QuoteLine {
            kind,
            label: label.into(),
            amount_cents,
        });
    }

    /// Record tax and finalize the total.
    pub fn set_tax(&mut self, tax_cents: i64) {
        self.tax_cents = tax_cents;
        self.total_cents = self.subtotal_cents + tax_cents;
        if tax_cents > 0 {
            self.lines.push(QuoteLine {
                kind: LineKind::Tax,
                label: "Sales tax".to_string(),
                amount_cents: tax_cents,
            });
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    pub fn is_active(&self) -> bool {
        self.status == QuoteStatus::Active && !self.is_expired()
    }
}

fn generate_reference() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(|b| (b as char).to_ascii_uppercase())
        .collect();
    format!("Q-{}", suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_line_tracks_subtotal() {
        let mut quote = Quote::new(Uuid::new_v4(), 900);
        quote.add_line(LineKind::Production, "500 flyers", 18700);
        quote.add_line(LineKind::Addon, "Corner rounding", 500);
        assert_eq!(quote.subtotal_cents, 19200);

        quote.set_tax(1584);
        assert_eq!(quote.total_cents, 20784);
        assert_eq!(quote.lines.len(), 3);
    }

    #[test]
    fn test_zero_tax_adds_no_line() {
        let mut quote = Quote::new(Uuid::new_v4(), 900);
        quote.add_line(LineKind::Production, "cards", 10000);
        quote.set_tax(0);
        assert_eq!(quote.total_cents, 10000);
        assert_eq!(quote.lines.len(), 1);
    }

    #[test]
    fn test_expiry() {
        let mut quote = Quote::new(Uuid::new_v4(), 900);
        assert!(quote.is_active());

        quote.expires_at = Utc::now() - chrono::Duration::seconds(1);
        assert!(quote.is_expired());
        assert!(!quote.is_active());
    }

    #[test]
    fn test_reference_shape() {
        let quote = Quote::new(Uuid::new_v4(), 900);
        assert!(quote.reference.starts_with("Q-"));
        assert_eq!(quote.reference.len(), 10);
    }
}
