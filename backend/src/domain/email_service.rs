use anyhow::{Context, Result};
use lettre::message::Mailbox;
use lettre::{
    transport::smtp::authentication::Credentials,
    transport::smtp::client::{Tls, TlsParameters},
    Message, SmtpTransport, Transport,
};
use log::info;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    pub smtp_server: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: String,
    pub from_email: String,
    pub organization_name: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_server: "smtp.gmail.com".to_string(),
            smtp_port: 587,
            username: String::new(),
            password: String::new(),
            from_email: String::new(),
            organization_name: "Community Foundation".to_string(),
        }
    }
}

/// Tone of a composed greeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GreetingTemplate {
    Celebration,
    Formal,
    Casual,
}

/// A composed greeting ready to send or hand to the caller for editing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailDraft {
    pub subject: String,
    pub body: String,
}

pub struct EmailService {
    config: EmailConfig,
    transport: Option<SmtpTransport>,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        Self {
            config,
            transport: None,
        }
    }

    pub fn initialize(&mut self) -> Result<()> {
        info!(
            "📧 Initializing email service for SMTP server: {}:{}",
            self.config.smtp_server, self.config.smtp_port
        );

        let tls_params = TlsParameters::new(self.config.smtp_server.clone())
            .context("Failed to create TLS parameters")?;

        let transport = SmtpTransport::relay(&self.config.smtp_server)
            .context("Failed to create SMTP relay")?
            .port(self.config.smtp_port)
            .tls(Tls::Required(tls_params))
            .credentials(Credentials::new(
                self.config.username.clone(),
                self.config.password.clone(),
            ))
            .build();

        self.transport = Some(transport);
        info!("📧 Email service initialized successfully");
        Ok(())
    }

    /// Build a birthday greeting for a member turning `age` this year.
    pub fn compose_birthday_greeting(
        &self,
        member_name: &str,
        age: i32,
        template: GreetingTemplate,
    ) -> EmailDraft {
        let org = &self.config.organization_name;
        let subject = format!("🎂 Happy Birthday {}!", member_name);

        let body = match template {
            GreetingTemplate::Celebration => format!(
                "🎉 Happy Birthday, {name}! 🎂\n\n\
                 Dear {name},\n\n\
                 Wishing you a fantastic {age}th birthday! May this special day bring you joy, laughter, and wonderful memories.\n\n\
                 As a valued member of {org}, we're grateful for your continued participation and dedication to our community.\n\n\
                 Here's to another year of growth, success, and amazing achievements!\n\n\
                 With warm birthday wishes,\n\
                 The {org} Team\n\n\
                 P.S. We hope your day is filled with cake, celebration, and all your favorite things! 🎈",
                name = member_name,
                age = age,
                org = org,
            ),
            GreetingTemplate::Formal => format!(
                "Dear {name},\n\n\
                 On behalf of the entire {org} community, I would like to extend our warmest birthday wishes to you as you celebrate your {age}th birthday.\n\n\
                 Your commitment and valuable contributions to our organization have been truly appreciated, and we look forward to continuing our journey together in the year ahead.\n\n\
                 May this new year of life bring you prosperity, good health, and continued success in all your endeavors.\n\n\
                 Best regards,\n\
                 {org}\n\
                 Administrative Team",
                name = member_name,
                age = age,
                org = org,
            ),
            GreetingTemplate::Casual => format!(
                "Hey {name}! 🎉\n\n\
                 Hope you're having an absolutely amazing {age}th birthday!\n\n\
                 Just wanted to drop you a quick note to let you know we're thinking of you on your special day. You're such an important part of our {org} family, and we're lucky to have you!\n\n\
                 Enjoy every moment of your celebration - you deserve all the happiness in the world!\n\n\
                 Cheers to another year of awesomeness! 🥳\n\n\
                 Much love,\n\
                 Your {org} friends",
                name = member_name,
                age = age,
                org = org,
            ),
        };

        EmailDraft { subject, body }
    }

    /// Build an anniversary greeting for a married couple marking `years`
    /// years this calendar year.
    pub fn compose_anniversary_greeting(
        &self,
        member_name: &str,
        spouse_name: &str,
        years: i32,
    ) -> EmailDraft {
        let org = &self.config.organization_name;
        let subject = format!("💍 Happy Anniversary {} & {}!", member_name, spouse_name);

        let body = format!(
            "Dear {name} and {spouse},\n\n\
             Congratulations on {years} wonderful years of marriage! The entire {org} community celebrates with you today.\n\n\
             May the year ahead bring your family continued love, health, and happiness.\n\n\
             With warm wishes,\n\
             The {org} Team",
            name = member_name,
            spouse = spouse_name,
            years = years,
            org = org,
        );

        EmailDraft { subject, body }
    }

    /// Send a composed greeting to the given recipients.
    pub fn send_greeting(&self, recipients: &[String], draft: &EmailDraft) -> Result<()> {
        let transport = self
            .transport
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Email service not initialized"))?;

        if recipients.is_empty() {
            info!("📧 No email recipients configured, skipping email send");
            return Ok(());
        }

        let mut email_builder = Message::builder().from(
            self.config
                .from_email
                .parse::<Mailbox>()
                .context("Failed to parse from email")?,
        );

        for email in recipients {
            email_builder = email_builder.to(email
                .parse::<Mailbox>()
                .context("Failed to parse recipient email")?);
        }

        let email = email_builder
            .subject(draft.subject.clone())
            .body(draft.body.clone())
            .context("Failed to build email")?;

        transport.send(&email).context("Failed to send email")?;
        info!(
            "📧 Greeting email sent successfully to {} recipients",
            recipients.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> EmailService {
        EmailService::new(EmailConfig {
            organization_name: "Sunrise Foundation".to_string(),
            ..EmailConfig::default()
        })
    }

    #[test]
    fn test_birthday_subject_and_age() {
        let draft = service().compose_birthday_greeting(
            "Kofi Mensah",
            30,
            GreetingTemplate::Celebration,
        );

        assert_eq!(draft.subject, "🎂 Happy Birthday Kofi Mensah!");
        assert!(draft.body.contains("fantastic 30th birthday"));
        assert!(draft.body.contains("Sunrise Foundation"));
    }

    #[test]
    fn test_templates_differ_in_tone() {
        let svc = service();
        let formal = svc.compose_birthday_greeting("Ama", 25, GreetingTemplate::Formal);
        let casual = svc.compose_birthday_greeting("Ama", 25, GreetingTemplate::Casual);

        assert!(formal.body.starts_with("Dear Ama,"));
        assert!(formal.body.contains("Administrative Team"));
        assert!(casual.body.starts_with("Hey Ama!"));
        assert_ne!(formal.body, casual.body);
        // Same subject regardless of tone
        assert_eq!(formal.subject, casual.subject);
    }

    #[test]
    fn test_anniversary_greeting_names_both_partners() {
        let draft = service().compose_anniversary_greeting("Kofi Mensah", "Ama Mensah", 10);

        assert_eq!(draft.subject, "💍 Happy Anniversary Kofi Mensah & Ama Mensah!");
        assert!(draft.body.contains("Dear Kofi Mensah and Ama Mensah,"));
        assert!(draft.body.contains("10 wonderful years"));
    }

    #[test]
    fn test_send_requires_initialization() {
        let svc = service();
        let draft = svc.compose_birthday_greeting("Kofi", 30, GreetingTemplate::Formal);

        let result = svc.send_greeting(&["kofi@example.com".to_string()], &draft);

        assert!(result.is_err());
    }
}
