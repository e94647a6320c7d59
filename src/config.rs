use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_address: String,
}

/// Identity block printed on every order form.
#[derive(Debug, Clone, Deserialize)]
pub struct SupplierConfig {
    pub name: String,
    pub street: String,
    pub city: String,
    pub country: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub smtp: SmtpConfig,
    /// Fixed operator inbox that receives every order notification.
    pub order_inbox: String,
    pub supplier: SupplierConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let smtp = SmtpConfig {
            host: std::env::var("SMTP_HOST")?,
            port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(587),
            username: std::env::var("SMTP_USERNAME")?,
            password: std::env::var("SMTP_PASSWORD")?,
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| "Les Vergers de Paris <orders@vergersdeparis.fr>".into()),
        };
        let order_inbox = std::env::var("ORDER_INBOX")?;
        let supplier = SupplierConfig {
            name: std::env::var("SUPPLIER_NAME")
                .unwrap_or_else(|_| "LES VERGERS DE PARIS".into()),
            street: std::env::var("SUPPLIER_STREET")
                .unwrap_or_else(|_| "104 rue d'Angers".into()),
            city: std::env::var("SUPPLIER_CITY")
                .unwrap_or_else(|_| "94584 Rungis Cedex".into()),
            country: std::env::var("SUPPLIER_COUNTRY").unwrap_or_else(|_| "France".into()),
        };
        Ok(Self {
            database_url,
            smtp,
            order_inbox,
            supplier,
        })
    }
}
