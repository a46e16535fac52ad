use async_trait::async_trait;

use crate::booking::Receipt;

/// Downstream receipt delivery. Failure never rolls back an already
/// committed booking; callers surface it only as a boolean flag.
#[async_trait]
pub trait ReceiptNotifier: Send + Sync {
    async fn send_receipt(
        &self,
        to_email: &str,
        receipt: &Receipt,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Stand-in used when no mail transport is configured (e.g. local dev
/// without SMTP). Always reports failure so `email_sent` stays false.
pub struct DisabledNotifier;

#[async_trait]
impl ReceiptNotifier for DisabledNotifier {
    async fn send_receipt(
        &self,
        _to_email: &str,
        receipt: &Receipt,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        tracing::debug!(
            "Mail transport not configured; skipping receipt for {}",
            receipt.booking_reference
        );
        Err("mail config missing".into())
    }
}
