use aerolink_domain::booking::Receipt;
use aerolink_domain::notify::ReceiptNotifier;
use async_trait::async_trait;
use lettre::message::MultiPart;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::app_config::MailConfig;

type MailResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// SMTP receipt delivery. Builds a multipart (plain + HTML) booking
/// confirmation from the receipt projection.
pub struct SmtpMailer {
    config: MailConfig,
}

impl SmtpMailer {
    pub fn new(config: MailConfig) -> Self {
        Self { config }
    }

    fn build_transport(&self) -> MailResult<AsyncSmtpTransport<Tokio1Executor>> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.smtp_host)?
            .port(self.config.smtp_port);
        if let (Some(user), Some(pass)) = (&self.config.smtp_user, &self.config.smtp_pass) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }
        Ok(builder.build())
    }

    fn plain_body(receipt: &Receipt, passenger_list: &str) -> String {
        format!(
            "Hello,\n\nThank you for your booking. Here is your receipt:\n\n\
             Booking Reference: {}\nFlight: {}\nRoute: {}\n\
             Departure: {}\nArrival: {}\nCabin Class: {}\n\
             Passengers: {}\nPassenger Names: {}\nTotal Paid: ${:.2}\nIssued At: {}\n\n— AEROLINK",
            receipt.booking_reference,
            receipt.flight_number,
            receipt.route(),
            receipt.departure_time.to_rfc2822(),
            receipt.arrival_time.to_rfc2822(),
            receipt.cabin_class.display_name(),
            receipt.passenger_count,
            passenger_list,
            receipt.total_amount,
            receipt.issued_at.to_rfc2822(),
        )
    }

    fn html_body(receipt: &Receipt, passenger_list: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html>
<body style="font-family: Arial, sans-serif; background-color: #f3f4f6; padding: 24px;">
  <div style="max-width: 560px; margin: 0 auto; background: #ffffff; border-radius: 12px; overflow: hidden;">
    <div style="background: #1e3a5f; padding: 24px; text-align: center;">
      <h1 style="margin: 0; color: #ffffff; font-size: 24px;">AEROLINK</h1>
      <p style="margin: 6px 0 0 0; color: rgba(255,255,255,0.9); font-size: 13px;">Booking Confirmation</p>
    </div>
    <div style="padding: 20px 28px;">
      <p style="margin: 0; font-size: 12px; color: #6b7280; text-transform: uppercase;">Booking reference</p>
      <p style="margin: 4px 0 16px 0; font-size: 22px; font-weight: 700; color: #1e3a5f; letter-spacing: 2px;">{reference}</p>
      <p style="margin: 0 0 4px 0; color: #1e293b;"><strong>Flight {flight}</strong> &middot; {cabin} &middot; {route}</p>
      <p style="margin: 0; color: #374151;">Departure: {departure}</p>
      <p style="margin: 0 0 12px 0; color: #374151;">Arrival: {arrival}</p>
      <p style="margin: 0; font-size: 12px; color: #6b7280;">Passengers ({count})</p>
      <p style="margin: 4px 0 16px 0; color: #374151;">{passengers}</p>
      <p style="margin: 0; font-size: 18px; color: #1e3a5f;"><strong>Total paid: ${total:.2}</strong></p>
      <p style="margin: 10px 0 0 0; font-size: 11px; color: #94a3b8;">Issued {issued}</p>
    </div>
    <div style="padding: 16px; text-align: center; background: #f1f5f9;">
      <p style="margin: 0; font-size: 12px; color: #64748b;">Thank you for flying with <strong>AEROLINK</strong></p>
    </div>
  </div>
</body>
</html>"#,
            reference = receipt.booking_reference,
            flight = receipt.flight_number,
            cabin = receipt.cabin_class.display_name(),
            route = receipt.route(),
            departure = receipt.departure_time.to_rfc2822(),
            arrival = receipt.arrival_time.to_rfc2822(),
            count = receipt.passenger_count,
            passengers = passenger_list,
            total = receipt.total_amount,
            issued = receipt.issued_at.to_rfc2822(),
        )
    }

    fn subject(receipt: &Receipt) -> String {
        format!(
            "Your AEROLINK booking confirmation – {}",
            receipt.booking_reference
        )
    }
}

#[async_trait]
impl ReceiptNotifier for SmtpMailer {
    async fn send_receipt(&self, to_email: &str, receipt: &Receipt) -> MailResult<()> {
        let mut passenger_list = receipt.passenger_names().join(", ");
        if passenger_list.is_empty() {
            passenger_list = "(not provided)".to_string();
        }

        let message = Message::builder()
            .from(self.config.from_email.parse()?)
            .to(to_email.parse()?)
            .subject(Self::subject(receipt))
            .multipart(MultiPart::alternative_plain_html(
                Self::plain_body(receipt, &passenger_list),
                Self::html_body(receipt, &passenger_list),
            ))?;

        self.build_transport()?.send(message).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aerolink_domain::booking::ReceiptPassenger;
    use aerolink_domain::cabin::CabinClass;
    use chrono::Utc;
    use uuid::Uuid;

    fn receipt() -> Receipt {
        Receipt {
            booking_id: Uuid::new_v4(),
            booking_reference: "ABC234".to_string(),
            flight_number: "AL101".to_string(),
            departure_airport_code: "JFK".to_string(),
            arrival_airport_code: "LHR".to_string(),
            departure_time: Utc::now(),
            arrival_time: Utc::now(),
            cabin_class: CabinClass::Business,
            total_amount: 500.0,
            passenger_count: 1,
            passengers: vec![ReceiptPassenger {
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                email: "ada@example.com".to_string(),
            }],
            issued_at: Utc::now(),
        }
    }

    #[test]
    fn test_subject_carries_reference() {
        assert!(SmtpMailer::subject(&receipt()).contains("ABC234"));
    }

    #[test]
    fn test_bodies_carry_receipt_fields() {
        let receipt = receipt();
        let plain = SmtpMailer::plain_body(&receipt, "Ada Lovelace");
        assert!(plain.contains("ABC234"));
        assert!(plain.contains("JFK -> LHR"));
        assert!(plain.contains("$500.00"));
        assert!(plain.contains("Business"));

        let html = SmtpMailer::html_body(&receipt, "Ada Lovelace");
        assert!(html.contains("ABC234"));
        assert!(html.contains("AL101"));
        assert!(html.contains("Ada Lovelace"));
    }
}
