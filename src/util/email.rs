use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::config::{ConfigError, EmailConfig};
use crate::model::bid_request::BidRequest;

/// Email service errors
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("SMTP error: {0}")]
    SmtpError(String),

    #[error("Message building error: {0}")]
    MessageError(String),

    #[error("Address error: {0}")]
    AddressError(String),
}

impl From<ConfigError> for EmailError {
    fn from(err: ConfigError) -> Self {
        EmailError::ConfigError(err.to_string())
    }
}

/// Outcome of the two per-submission sends. Ephemeral, returned in the
/// submission response; never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailDispatchResult {
    pub client: bool,
    pub admin: bool,
}

/// Best-effort notification dispatch for a freshly persisted bid request.
/// Runs only after the record is durable; failure is never escalated.
#[async_trait]
pub trait BidNotifier: Send + Sync {
    async fn notify(&self, bid: &BidRequest) -> EmailDispatchResult;
}

/// SMTP email service implementation
pub struct SmtpEmailService {
    pub config: EmailConfig,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpEmailService {
    /// Create a new SMTP email service
    #[instrument(skip(config), fields(host = %config.host, port = config.port))]
    pub fn new(config: EmailConfig) -> Result<Self, EmailError> {
        info!("Initializing SMTP email service");

        config.validate().map_err(EmailError::from)?;

        let mut transport_builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
            .port(config.port)
            .timeout(Some(std::time::Duration::from_secs(config.connection_timeout_secs)));

        // secure=true means implicit TLS, secure=false means STARTTLS
        if config.secure {
            let tls_parameters = TlsParameters::new(config.host.clone())
                .map_err(|e| EmailError::ConfigError(format!("TLS configuration error: {}", e)))?;
            transport_builder = transport_builder.tls(Tls::Wrapper(tls_parameters));
        } else if config.port == 1025 || config.host == "localhost" {
            // Local debug transports speak plain SMTP
            transport_builder = transport_builder.tls(Tls::None);
        } else {
            let tls_parameters = TlsParameters::new(config.host.clone())
                .map_err(|e| EmailError::ConfigError(format!("TLS configuration error: {}", e)))?;
            transport_builder = transport_builder.tls(Tls::Required(tls_parameters));
        }

        if !config.username.is_empty() && !config.password.is_empty() {
            let credentials = Credentials::new(config.username.clone(), config.password.clone());
            transport_builder = transport_builder.credentials(credentials);
        }

        let transport = transport_builder.build();

        info!("SMTP email service initialized successfully");
        Ok(Self { config, transport })
    }

    /// Send one HTML email
    #[instrument(skip(self, html), fields(to = %to, subject = %subject))]
    pub async fn send_email(&self, to: &str, subject: &str, html: String) -> Result<(), EmailError> {
        info!("Sending email to: {}", to);

        let from_mailbox: Mailbox = format!("{} <{}>", self.config.from_name, self.config.from_email)
            .parse()
            .map_err(|e| EmailError::AddressError(format!("Invalid from address: {}", e)))?;

        let to_mailbox: Mailbox = to
            .parse()
            .map_err(|e| EmailError::AddressError(format!("Invalid to address: {}", e)))?;

        let message = Message::builder()
            .from(from_mailbox)
            .to(to_mailbox)
            .subject(subject)
            .singlepart(
                lettre::message::SinglePart::builder()
                    .header(ContentType::TEXT_HTML)
                    .body(html),
            )
            .map_err(|e| EmailError::MessageError(format!("Failed to build HTML message: {}", e)))?;

        self.transport.send(message).await.map_err(|e| {
            error!("Failed to send email: {}", e);
            EmailError::SmtpError(format!("Failed to send email: {}", e))
        })?;

        info!("Email sent successfully");
        Ok(())
    }
}

#[async_trait]
impl BidNotifier for SmtpEmailService {
    /// Attempt the client confirmation and the admin alert independently;
    /// report each outcome as a boolean and never fail the caller.
    #[instrument(skip(self, bid), fields(bid_id = bid.id))]
    async fn notify(&self, bid: &BidRequest) -> EmailDispatchResult {
        let client = match self
            .send_email(
                &bid.email,
                &format!("Thank you for your bid request - {}", self.config.from_name),
                client_confirmation_html(bid, &self.config.from_name),
            )
            .await
        {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to send client confirmation for bid {}: {}", bid.id, e);
                false
            }
        };

        let admin = match self
            .send_email(
                &self.config.admin_email,
                &format!("New Bid Request: {}", bid.project_title),
                admin_alert_html(bid),
            )
            .await
        {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to send admin alert for bid {}: {}", bid.id, e);
                false
            }
        };

        EmailDispatchResult { client, admin }
    }
}

/// `web-design` -> `WEB DESIGN`
pub fn display_token(token: &str) -> String {
    token.replace('-', " ").to_uppercase()
}

/// `under-5k` -> `UNDER - 5K`
pub fn display_budget(token: &str) -> String {
    token.replace('-', " - ").to_uppercase()
}

/// Confirmation email rendered for the submitter. Record fields were
/// HTML-escaped at intake and are interpolated directly.
pub fn client_confirmation_html(bid: &BidRequest, studio: &str) -> String {
    let date = bid.created_at.format("%B %-d, %Y");
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Bid Request Confirmation</title>
    <style>
        body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; }}
        .container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}
        .header {{ background: #2563eb; color: white; padding: 20px; text-align: center; }}
        .content {{ padding: 20px; background: #f9fafb; }}
        .footer {{ padding: 20px; text-align: center; color: #666; font-size: 14px; }}
        .highlight {{ background: #dbeafe; padding: 15px; border-radius: 5px; margin: 15px 0; }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Thank You for Your Bid Request!</h1>
        </div>
        <div class="content">
            <p>Dear {first_name} {last_name},</p>
            <p>Thank you for reaching out to {studio}! We've received your bid request and are excited to learn more about your project.</p>

            <div class="highlight">
                <h3>Project Details:</h3>
                <p><strong>Project:</strong> {project_title}</p>
                <p><strong>Type:</strong> {project_type}</p>
                <p><strong>Budget Range:</strong> {budget}</p>
                <p><strong>Timeline:</strong> {timeline}</p>
            </div>

            <p>Our team will review your project details and get back to you within 24 hours with a detailed quote and next steps.</p>

            <p>If you have any questions in the meantime, please don't hesitate to reach out to us.</p>

            <p>Best regards,<br>
            The {studio} Team</p>
        </div>
        <div class="footer">
            <p>This email was sent in response to your bid request submitted on {date}.</p>
        </div>
    </div>
</body>
</html>"#,
        first_name = bid.first_name,
        last_name = bid.last_name,
        studio = studio,
        project_title = bid.project_title,
        project_type = display_token(&bid.project_type),
        budget = display_budget(&bid.budget),
        timeline = display_token(&bid.timeline),
        date = date,
    )
}

/// Alert email rendered for the admin inbox.
pub fn admin_alert_html(bid: &BidRequest) -> String {
    let services = if bid.services.is_empty() {
        "None specified".to_string()
    } else {
        bid.services.join(", ")
    };
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>New Bid Request - {project_title}</title>
    <style>
        body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; }}
        .container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}
        .header {{ background: #dc2626; color: white; padding: 20px; text-align: center; }}
        .content {{ padding: 20px; background: #f9fafb; }}
        .section {{ margin: 20px 0; padding: 15px; background: white; border-radius: 5px; }}
        .highlight {{ background: #fef3c7; padding: 10px; border-radius: 5px; margin: 10px 0; }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>New Bid Request Received!</h1>
        </div>
        <div class="content">
            <div class="section">
                <h3>Contact Information</h3>
                <p><strong>Name:</strong> {first_name} {last_name}</p>
                <p><strong>Email:</strong> {email}</p>
                <p><strong>Phone:</strong> {phone}</p>
                <p><strong>Company:</strong> {company}</p>
            </div>

            <div class="section">
                <h3>Project Details</h3>
                <p><strong>Project Title:</strong> {project_title}</p>
                <p><strong>Project Type:</strong> {project_type}</p>
                <p><strong>Budget Range:</strong> {budget}</p>
                <p><strong>Timeline:</strong> {timeline}</p>
                <p><strong>Services Needed:</strong> {services}</p>
                <p><strong>How they heard about us:</strong> {referral}</p>
            </div>

            <div class="section">
                <h3>Project Description</h3>
                <p>{description}</p>
            </div>

            <div class="highlight">
                <p><strong>Action Required:</strong> Please review this bid request and respond within 24 hours.</p>
                <p><strong>Bid ID:</strong> #{id}</p>
            </div>
        </div>
    </div>
</body>
</html>"#,
        project_title = bid.project_title,
        first_name = bid.first_name,
        last_name = bid.last_name,
        email = bid.email,
        phone = bid.phone.as_deref().unwrap_or("Not provided"),
        company = bid.company.as_deref().unwrap_or("Not provided"),
        project_type = display_token(&bid.project_type),
        budget = display_budget(&bid.budget),
        timeline = display_token(&bid.timeline),
        services = services,
        referral = bid.referral.as_deref().unwrap_or("Not specified"),
        description = bid.description,
        id = bid.id,
    )
}