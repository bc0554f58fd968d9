//! Lead notification formatting
//!
//! Renders the team-facing and client-facing messages for estimate and
//! contact submissions. Money and schedule strings are computed once per
//! estimate (`EstimateView`) and handed to every template, so both audiences
//! always read the same figures.

pub mod builtin;
pub mod engine;
pub mod mailer;
pub mod resolver;

use crate::catalog::builtin::{PAIN_POINTS, PRIMARY_GOAL};
use crate::catalog::Catalog;
use crate::models::{AnswerSet, ContactLead, EstimateLead, EstimateResult, QuestionType, Span};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tera::Context;

pub use engine::{format_usd, TemplateEngine};
pub use mailer::{
    deliver_all, LogMailer, MailError, Mailer, MemoryMailer, OutboundEmail, SmtpMailer,
    SmtpSettings, WebhookMailer,
};
pub use resolver::{TemplateResolver, TemplateSource};

const NOT_ANSWERED: &str = "Not answered";
const NONE_SELECTED: &str = "None selected";

pub fn format_price_range(range: Span) -> String {
    format!("{} - {}", format_usd(range.min), format_usd(range.max))
}

pub fn format_timeline(weeks: Span) -> String {
    format!("{} - {} weeks", weeks.min, weeks.max)
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Estimate fields as the templates see them
#[derive(Debug, Clone, Serialize)]
pub struct EstimateView {
    pub tier: String,
    pub tier_description: String,
    pub investment: String,
    pub timeline: String,
    pub fit_score: u8,
    pub fit_assessment: String,
    pub phases: Vec<String>,
    pub key_features: Vec<String>,
    pub recommendations: Vec<String>,
    pub next_steps: Vec<String>,
}

impl From<&EstimateResult> for EstimateView {
    fn from(estimate: &EstimateResult) -> Self {
        Self {
            tier: estimate.tier.to_string(),
            tier_description: estimate.tier_description.clone(),
            investment: format_price_range(estimate.price_range),
            timeline: format_timeline(estimate.timeline_weeks),
            fit_score: estimate.fit_score,
            fit_assessment: estimate.fit_assessment.clone(),
            phases: estimate.phases.clone(),
            key_features: estimate.key_features.clone(),
            recommendations: estimate.recommendations.clone(),
            next_steps: estimate.next_steps.clone(),
        }
    }
}

/// One questionnaire answer; `items` is set for multi-select questions that have selections
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AnswerLine {
    pub heading: String,
    pub value: String,
    pub items: Vec<String>,
}

/// Answers grouped under a wizard page title
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AnswerSection {
    pub title: String,
    pub lines: Vec<AnswerLine>,
}

/// Group answers by wizard page, with option ids replaced by their labels
pub fn answer_sections(answers: &AnswerSet, catalog: &Catalog) -> Vec<AnswerSection> {
    (1..=catalog.step_count())
        .map(|step| {
            let title = catalog
                .step_info(step)
                .map(|info| info.title.clone())
                .unwrap_or_else(|| format!("Step {}", step));

            let lines = catalog
                .questions_for_step(step)
                .map(|question| {
                    let (value, items) = match question.kind {
                        QuestionType::Single => {
                            let value = answers
                                .single(&question.id)
                                .map(|id| question.label_for(id))
                                .unwrap_or(NOT_ANSWERED);
                            (value.to_string(), Vec::new())
                        }
                        QuestionType::Multiple => {
                            let items: Vec<String> = answers
                                .selections(&question.id)
                                .into_iter()
                                .map(|id| question.label_for(id).to_string())
                                .collect();
                            let value = if items.is_empty() {
                                NONE_SELECTED.to_string()
                            } else {
                                items.join(", ")
                            };
                            (value, items)
                        }
                    };
                    AnswerLine {
                        heading: question.heading(),
                        value,
                        items,
                    }
                })
                .collect();

            AnswerSection { title, lines }
        })
        .collect()
}

/// Sender and team addresses for lead mail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailSettings {
    pub from: String,
    pub team_recipients: Vec<String>,
    pub send_client_copies: bool,
}

pub fn estimate_subject(estimate: &EstimateResult) -> String {
    format!("New Project Estimate - {} Tier", estimate.tier)
}

pub fn contact_subject(lead: &ContactLead) -> String {
    if !lead.has_estimate() {
        return format!("Contact Form - {}", lead.name);
    }
    format!(
        "Contact Form - {} (Has Estimate: {})",
        lead.name,
        lead.attached_tier().as_deref().unwrap_or("Unknown")
    )
}

/// Renders lead messages against one catalog and template set
pub struct LeadNotifier {
    engine: TemplateEngine,
    catalog: Arc<Catalog>,
    settings: MailSettings,
}

impl LeadNotifier {
    pub fn new(engine: TemplateEngine, catalog: Arc<Catalog>, settings: MailSettings) -> Self {
        Self {
            engine,
            catalog,
            settings,
        }
    }

    fn estimate_context(&self, lead: &EstimateLead) -> Context {
        let mut context = Context::new();
        context.insert("lead_id", &lead.lead_id.to_string());
        context.insert("submitted_at", &format_timestamp(lead.submitted_at));
        context.insert(
            "client_email",
            lead.client_email.as_deref().unwrap_or_default(),
        );
        context.insert("estimate", &EstimateView::from(&lead.estimate));
        context.insert("sections", &answer_sections(&lead.answers, &self.catalog));
        context
    }

    fn contact_context(&self, lead: &ContactLead) -> Context {
        let mut context = Context::new();
        context.insert("lead_id", &lead.lead_id.to_string());
        context.insert("submitted_at", &format_timestamp(lead.submitted_at));
        context.insert("name", &lead.name);
        context.insert("email", &lead.email);
        context.insert("project_type", &lead.project_type);
        context.insert("message", &lead.message);
        // absent optionals stay undefined so templates can use `default`
        for (key, value) in [
            ("company", &lead.company),
            ("phone", &lead.phone),
            ("budget", &lead.budget),
            ("timeline", &lead.timeline),
        ] {
            if let Some(value) = value {
                context.insert(key, value);
            }
        }

        context.insert("has_estimate", &lead.estimate_data.is_some());
        if let Some(data) = &lead.estimate_data {
            context.insert("estimate", &EstimateView::from(&data.estimate));
            let pain_points: Vec<&str> = data
                .answers
                .selections(PAIN_POINTS)
                .into_iter()
                .map(|id| self.catalog.label_for(PAIN_POINTS, id))
                .collect();
            context.insert("pain_points", &pain_points);
            let primary_goal = data
                .answers
                .single(PRIMARY_GOAL)
                .map(|id| self.catalog.label_for(PRIMARY_GOAL, id))
                .unwrap_or(NOT_ANSWERED);
            context.insert("primary_goal", primary_goal);
        }
        context.insert("has_raw_estimate", &lead.unrecognized_estimate.is_some());
        if let Some(raw) = &lead.unrecognized_estimate {
            let pretty = serde_json::to_string_pretty(raw).unwrap_or_else(|_| raw.to_string());
            context.insert("raw_estimate", &pretty);
        }
        context
    }

    pub fn render_estimate_team(&self, lead: &EstimateLead) -> Result<(String, String)> {
        let context = self.estimate_context(lead);
        let text = self.engine.render(builtin::ESTIMATE_TEAM_TEXT, &context)?;
        let html = self.engine.render(builtin::ESTIMATE_TEAM_HTML, &context)?;
        Ok((text, html))
    }

    pub fn render_estimate_client(&self, lead: &EstimateLead) -> Result<String> {
        self.engine
            .render(builtin::ESTIMATE_CLIENT_TEXT, &self.estimate_context(lead))
    }

    pub fn render_contact_team(&self, lead: &ContactLead) -> Result<(String, String)> {
        let context = self.contact_context(lead);
        let text = self.engine.render(builtin::CONTACT_TEAM_TEXT, &context)?;
        let html = self.engine.render(builtin::CONTACT_TEAM_HTML, &context)?;
        Ok((text, html))
    }

    pub fn render_contact_client(&self, lead: &ContactLead) -> Result<String> {
        self.engine
            .render(builtin::CONTACT_CLIENT_TEXT, &self.contact_context(lead))
    }

    /// Plain-text summary of a result, used by the CLI
    pub fn render_summary(&self, estimate: &EstimateResult) -> Result<String> {
        let mut context = Context::new();
        context.insert("estimate", &EstimateView::from(estimate));
        self.engine.render(builtin::ESTIMATE_SUMMARY_TEXT, &context)
    }

    /// Team notification plus, when the lead left an address, a client copy
    pub fn estimate_messages(&self, lead: &EstimateLead) -> Result<Vec<OutboundEmail>> {
        let (text, html) = self.render_estimate_team(lead)?;
        let mut messages = vec![OutboundEmail {
            from: self.settings.from.clone(),
            to: self.settings.team_recipients.clone(),
            reply_to: lead.client_email.clone(),
            subject: estimate_subject(&lead.estimate),
            text,
            html: Some(html),
        }];

        if let (true, Some(client)) = (self.settings.send_client_copies, &lead.client_email) {
            messages.push(OutboundEmail {
                from: self.settings.from.clone(),
                to: vec![client.clone()],
                reply_to: None,
                subject: format!("Your Project Estimate - {} Tier", lead.estimate.tier),
                text: self.render_estimate_client(lead)?,
                html: None,
            });
        }

        Ok(messages)
    }

    pub fn contact_messages(&self, lead: &ContactLead) -> Result<Vec<OutboundEmail>> {
        let (text, html) = self.render_contact_team(lead)?;
        let mut messages = vec![OutboundEmail {
            from: self.settings.from.clone(),
            to: self.settings.team_recipients.clone(),
            reply_to: Some(lead.email.clone()),
            subject: contact_subject(lead),
            text,
            html: Some(html),
        }];

        if self.settings.send_client_copies {
            messages.push(OutboundEmail {
                from: self.settings.from.clone(),
                to: vec![lead.email.clone()],
                reply_to: None,
                subject: "Thanks for contacting YourTechAssist".to_string(),
                text: self.render_contact_client(lead)?,
                html: None,
            });
        }

        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::Estimator;
    use crate::models::{ContactSubmission, EstimateData, EstimateSubmission, Tier};

    fn notifier() -> LeadNotifier {
        LeadNotifier::new(
            TemplateEngine::builtin().unwrap(),
            Arc::new(Catalog::builtin()),
            MailSettings {
                from: "noreply@example.com".to_string(),
                team_recipients: vec!["team@example.com".to_string()],
                send_client_copies: true,
            },
        )
    }

    fn answers() -> AnswerSet {
        AnswerSet::new()
            .with_single("project_type", "customer_portal")
            .with_multiple("pain_points", &["errors", "scaling"])
            .with_single("primary_goal", "scale")
            .with_multiple("features", &["auth", "integrations"])
            .with_single("budget_range", "scale")
    }

    fn estimate_lead(client_email: Option<&str>) -> EstimateLead {
        let answers = answers();
        let estimate = Estimator::builtin().estimate(&answers);
        EstimateSubmission {
            answers: Some(answers),
            estimate: Some(estimate),
            submitted_at: None,
            client_email: client_email.map(str::to_string),
        }
        .validate(Utc::now())
        .unwrap()
    }

    #[test]
    fn test_answer_sections_use_per_question_labels() {
        let sections = answer_sections(&answers(), &Catalog::builtin());
        assert_eq!(sections.len(), 6);
        assert_eq!(sections[0].title, "Your Situation");

        let goals = &sections[2];
        assert_eq!(goals.lines[0].heading, "Primary Goal");
        assert_eq!(goals.lines[0].value, "Enable Growth");
        assert_eq!(goals.lines[1].value, "Not answered");

        let budget = &sections[4].lines[1];
        assert_eq!(budget.heading, "Budget");
        assert_eq!(budget.value, "$75,000 - $150,000");

        let pain = &sections[1].lines[0];
        assert_eq!(pain.items, vec!["Too Many Errors", "Struggling to Scale"]);
    }

    #[test]
    fn test_estimate_team_message() {
        let lead = estimate_lead(Some("client@example.com"));
        let messages = notifier().estimate_messages(&lead).unwrap();
        assert_eq!(messages.len(), 2);

        let team = &messages[0];
        assert_eq!(team.to, vec!["team@example.com"]);
        assert_eq!(team.reply_to.as_deref(), Some("client@example.com"));
        assert_eq!(
            team.subject,
            format!("New Project Estimate - {} Tier", lead.estimate.tier)
        );
        assert!(team.text.contains("Client Email: client@example.com"));
        assert!(team.text.contains("Budget: $75,000 - $150,000"));
        assert!(team.text.contains("  - Third-Party Integrations"));
        assert!(team.text.contains("1. Discovery & Planning"));
        assert!(team.html.as_ref().unwrap().contains("<!DOCTYPE html>"));

        let client = &messages[1];
        assert_eq!(client.to, vec!["client@example.com"]);
        assert!(!client.text.contains("Fit Score"));
    }

    #[test]
    fn test_estimate_without_client_email_only_notifies_team() {
        let messages = notifier().estimate_messages(&estimate_lead(None)).unwrap();
        assert_eq!(messages.len(), 1);
        assert!(!messages[0].text.contains("Client Email"));
    }

    #[test]
    fn test_contact_message_with_estimate() {
        let estimate_lead = estimate_lead(None);
        let lead = ContactSubmission {
            name: Some("Jane Doe".to_string()),
            email: Some("jane@example.com".to_string()),
            project_type: Some("Customer Portal".to_string()),
            message: Some("Let's talk".to_string()),
            estimate_data: Some(serde_json::to_value(estimate_lead.data()).unwrap()),
            ..Default::default()
        }
        .validate(Utc::now())
        .unwrap();

        let n = notifier();
        let messages = n.contact_messages(&lead).unwrap();
        let team = &messages[0];
        assert_eq!(
            team.subject,
            format!(
                "Contact Form - Jane Doe (Has Estimate: {})",
                estimate_lead.estimate.tier
            )
        );
        assert!(team.text.contains("Company: Not provided"));
        assert!(team.text.contains("Budget: Not specified"));
        assert!(team.text.contains("PREVIOUS ESTIMATE DATA"));
        assert!(team.text.contains("- Too Many Errors"));
        assert!(team.text.contains("Primary Goal: Enable Growth"));

        let html = team.html.as_ref().unwrap();
        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("Previous Estimate"));
        assert!(html.contains(&format_price_range(estimate_lead.estimate.price_range)));
        assert!(html.contains("<li>Too Many Errors</li>"));
        assert!(html.contains("mailto:jane@example.com"));

        let client = n.render_contact_client(&lead).unwrap();
        assert!(client.starts_with("Hi Jane Doe,"));
        assert!(client.contains("We have your estimate on file"));
    }

    #[test]
    fn test_contact_message_without_estimate() {
        let lead = ContactSubmission {
            name: Some("Sam".to_string()),
            email: Some("sam@example.com".to_string()),
            company: Some("Acme".to_string()),
            project_type: Some("Internal Tool".to_string()),
            message: Some("Hello".to_string()),
            ..Default::default()
        }
        .validate(Utc::now())
        .unwrap();

        let (text, html) = notifier().render_contact_team(&lead).unwrap();
        assert_eq!(contact_subject(&lead), "Contact Form - Sam");
        assert!(text.contains("Company: Acme"));
        assert!(!text.contains("PREVIOUS ESTIMATE DATA"));
        assert!(html.contains("Acme"));
        assert!(!html.contains("Previous Estimate"));
    }

    #[test]
    fn test_contact_message_with_unparsed_estimate() {
        let lead = ContactSubmission {
            name: Some("Ana".to_string()),
            email: Some("ana@example.com".to_string()),
            project_type: Some("SaaS Product".to_string()),
            message: Some("See attached".to_string()),
            estimate_data: Some(serde_json::json!({
                "estimate": { "tier": "Growth", "priceRange": { "min": 75000, "max": 150000 } }
            })),
            ..Default::default()
        }
        .validate(Utc::now())
        .unwrap();

        assert_eq!(contact_subject(&lead), "Contact Form - Ana (Has Estimate: Growth)");

        let (text, html) = notifier().render_contact_team(&lead).unwrap();
        assert!(text.contains("PREVIOUS ESTIMATE DATA (as submitted)"));
        assert!(text.contains("\"min\": 75000"));
        assert!(!text.contains("Key Pain Points"));
        assert!(html.contains("75000"));

        let client = notifier().render_contact_client(&lead).unwrap();
        assert!(!client.contains("We have your estimate on file"));
    }

    #[test]
    fn test_summary_lists_next_steps() {
        let estimate = Estimator::builtin().estimate(&AnswerSet::new());
        let summary = notifier().render_summary(&estimate).unwrap();
        assert!(summary.starts_with("Starter Tier"));
        assert!(summary.contains("Investment: $5,000 - $15,000"));
        assert!(summary.contains("1. Schedule a free discovery call to discuss your project"));
    }

    #[test]
    fn test_format_helpers() {
        assert_eq!(
            format_price_range(Span::new(25_000, 50_000)),
            "$25,000 - $50,000"
        );
        assert_eq!(format_timeline(Span::new(8, 14)), "8 - 14 weeks");
    }

    #[test]
    fn test_estimate_data_subject_tier() {
        let data = EstimateData {
            answers: AnswerSet::new(),
            estimate: Estimator::builtin().estimate(&AnswerSet::new()),
            submitted_at: None,
        };
        assert_eq!(data.estimate.tier, Tier::Starter);
        assert_eq!(
            estimate_subject(&data.estimate),
            "New Project Estimate - Starter Tier"
        );
    }
}
