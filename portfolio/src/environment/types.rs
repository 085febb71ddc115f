use portfolio_core_contact_impl::ContactServiceImpl;
use portfolio_core_health_impl::HealthServiceImpl;
use portfolio_email_impl::EmailServiceImpl;
use portfolio_shared_impl::time::TimeServiceImpl;
use portfolio_templates_impl::TemplateServiceImpl;

// API
pub type RestServer = portfolio_api_rest::RestServer<HealthFeature, ContactFeature>;

// Email
pub type Email = EmailServiceImpl;

// Template
pub type Template = TemplateServiceImpl;

// Shared
pub type Time = TimeServiceImpl;

// Core
pub type HealthFeature = HealthServiceImpl;
pub type ContactFeature = ContactServiceImpl<Time, Template, Email>;
