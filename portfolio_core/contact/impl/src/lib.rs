use std::sync::Arc;

use portfolio_core_contact_contracts::{ContactSendMessageError, ContactService};
use portfolio_email_contracts::{ContentType, Email, EmailService};
use portfolio_models::{
    contact::ContactSubmission,
    email_address::{EmailAddress, EmailAddressWithName},
};
use portfolio_shared_contracts::time::TimeService;
use portfolio_templates_contracts::{ContactNotificationTemplate, TemplateService};
use tracing::{error, info, instrument, warn};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

#[derive(Debug, Clone)]
pub struct ContactServiceImpl<Time, Template, Email> {
    time: Time,
    template: Template,
    email: Email,
    config: ContactServiceConfig,
}

#[derive(Debug, Clone)]
pub struct ContactServiceConfig {
    /// Address receiving the notifications.
    pub recipient: Arc<EmailAddress>,
}

impl<Time, Template, Email> ContactServiceImpl<Time, Template, Email> {
    pub fn new(
        time: Time,
        template: Template,
        email: Email,
        config: ContactServiceConfig,
    ) -> Self {
        Self {
            time,
            template,
            email,
            config,
        }
    }
}

impl<Time, TemplateS, EmailS> ContactService for ContactServiceImpl<Time, TemplateS, EmailS>
where
    Time: TimeService,
    TemplateS: TemplateService,
    EmailS: EmailService,
{
    #[instrument(skip_all)]
    async fn send_message(
        &self,
        submission: ContactSubmission,
    ) -> Result<(), ContactSendMessageError> {
        let ContactSubmission {
            name,
            email,
            message,
        } = submission;

        // header values must not contain line breaks
        let subject = format!(
            "Portfolio Contact Form: Message from {}",
            name.chars().filter(|c| !c.is_control()).collect::<String>()
        );

        let reply_to = email
            .parse::<EmailAddressWithName>()
            .inspect_err(|err| {
                warn!(email = email.as_str(), "omitting invalid reply-to address: {err}")
            })
            .ok();

        let body = self.template.render(&ContactNotificationTemplate {
            name: (*name).clone(),
            email: (*email).clone(),
            date: self.time.now().format(DATE_FORMAT).to_string(),
            message: message.into_inner(),
        })?;

        let notification = Email {
            recipient: (*self.config.recipient).clone(),
            subject,
            body,
            content_type: ContentType::Html,
            reply_to,
        };

        match self.email.send(notification).await {
            Ok(true) => {
                info!(name = name.as_str(), email = email.as_str(), "Email sent successfully");
                Ok(())
            }
            Ok(false) => {
                error!("Failed to send email: smtp relay rejected the message");
                Err(ContactSendMessageError::Send)
            }
            Err(err) => {
                error!("Failed to send email: {err:#}");
                Err(ContactSendMessageError::Send)
            }
        }
    }
}
