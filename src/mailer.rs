use axum::async_trait;
use lettre::{
    message::{header::ContentType, Attachment, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::config::SmtpConfig;

#[derive(Debug)]
pub struct PdfAttachment {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
    pub attachment: Option<PdfAttachment>,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> anyhow::Result<()>;
}

#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> anyhow::Result<Self> {
        let credentials =
            Credentials::new(config.username.clone(), config.password.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(credentials)
            .build();
        Ok(Self {
            transport,
            from_address: config.from_address.clone(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: OutgoingEmail) -> anyhow::Result<()> {
        let builder = Message::builder()
            .from(self
                .from_address
                .parse()
                .map_err(|_| anyhow::anyhow!("invalid from address {}", self.from_address))?)
            .to(email
                .to
                .parse()
                .map_err(|_| anyhow::anyhow!("invalid recipient {}", email.to))?)
            .subject(email.subject);

        let html = SinglePart::builder()
            .header(ContentType::TEXT_HTML)
            .body(email.html_body);

        let message = match email.attachment {
            Some(a) => builder.multipart(
                MultiPart::mixed().singlepart(html).singlepart(
                    Attachment::new(a.filename)
                        .body(a.bytes, ContentType::parse("application/pdf")?),
                ),
            )?,
            None => builder.multipart(MultiPart::mixed().singlepart(html))?,
        };

        self.transport.send(message).await?;
        Ok(())
    }
}
