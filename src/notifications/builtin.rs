// Built-in notification templates

/// Built-in template names
pub const ESTIMATE_TEAM_TEXT: &str = "estimate_team.txt";
pub const ESTIMATE_TEAM_HTML: &str = "estimate_team.html";
pub const ESTIMATE_CLIENT_TEXT: &str = "estimate_client.txt";
pub const CONTACT_TEAM_TEXT: &str = "contact_team.txt";
pub const CONTACT_TEAM_HTML: &str = "contact_team.html";
pub const CONTACT_CLIENT_TEXT: &str = "contact_client.txt";
pub const ESTIMATE_SUMMARY_TEXT: &str = "estimate_summary.txt";

/// Get a built-in template by name
pub fn get_builtin_template(name: &str) -> Option<&'static str> {
    match name {
        ESTIMATE_TEAM_TEXT => Some(ESTIMATE_TEAM_TEXT_TEMPLATE),
        ESTIMATE_TEAM_HTML => Some(ESTIMATE_TEAM_HTML_TEMPLATE),
        ESTIMATE_CLIENT_TEXT => Some(ESTIMATE_CLIENT_TEXT_TEMPLATE),
        CONTACT_TEAM_TEXT => Some(CONTACT_TEAM_TEXT_TEMPLATE),
        CONTACT_TEAM_HTML => Some(CONTACT_TEAM_HTML_TEMPLATE),
        CONTACT_CLIENT_TEXT => Some(CONTACT_CLIENT_TEXT_TEMPLATE),
        ESTIMATE_SUMMARY_TEXT => Some(ESTIMATE_SUMMARY_TEXT_TEMPLATE),
        _ => None,
    }
}

/// List all built-in template names
pub fn list_builtin_templates() -> Vec<&'static str> {
    vec![
        ESTIMATE_TEAM_TEXT,
        ESTIMATE_TEAM_HTML,
        ESTIMATE_CLIENT_TEXT,
        CONTACT_TEAM_TEXT,
        CONTACT_TEAM_HTML,
        CONTACT_CLIENT_TEXT,
        ESTIMATE_SUMMARY_TEXT,
    ]
}

const ESTIMATE_TEAM_TEXT_TEMPLATE: &str = r#"NEW PROJECT ESTIMATE SUBMISSION
===============================
Lead: {{ lead_id }}
Submitted: {{ submitted_at }}
{% if client_email %}Client Email: {{ client_email }}
{% endif %}
ESTIMATE RESULTS
----------------
Recommended Tier: {{ estimate.tier }}
{{ estimate.tier_description }}

Investment: {{ estimate.investment }}
Timeline: {{ estimate.timeline }}
Fit Score: {{ estimate.fit_score }}%
Assessment: {{ estimate.fit_assessment }}

QUESTIONNAIRE RESPONSES
-----------------------
{% for section in sections %}
{{ section.title | upper }}
{% for line in section.lines %}{% if line.items %}{{ line.heading }}:
{% for item in line.items %}  - {{ item }}
{% endfor %}{% else %}{{ line.heading }}: {{ line.value }}
{% endif %}{% endfor %}{% endfor %}
KEY FEATURES IDENTIFIED
-----------------------
{% for feature in estimate.key_features %}- {{ feature }}
{% endfor %}
RECOMMENDATIONS
---------------
{% for recommendation in estimate.recommendations %}- {{ recommendation }}
{% endfor %}
PROJECT PHASES
--------------
{% for phase in estimate.phases %}{{ loop.index }}. {{ phase }}
{% endfor %}"#;

const ESTIMATE_TEAM_HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <style>
    body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: #333; }
    .container { max-width: 600px; margin: 0 auto; padding: 20px; }
    .header { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 30px; border-radius: 12px 12px 0 0; }
    .content { background: #fff; padding: 30px; border: 1px solid #e5e7eb; border-top: none; }
    .section-title { font-size: 14px; font-weight: 600; color: #6b7280; text-transform: uppercase; margin-bottom: 12px; }
    .estimate-card { background: #f9fafb; border-radius: 12px; padding: 20px; margin-bottom: 20px; }
    .tier-badge { display: inline-block; background: #667eea; color: white; padding: 4px 12px; border-radius: 20px; font-weight: 600; }
    .stat-label { font-size: 12px; color: #6b7280; }
    .stat-value { font-size: 18px; font-weight: 600; color: #111827; }
    .fit-bar { height: 8px; background: #e5e7eb; border-radius: 4px; margin-top: 8px; }
    .fit-fill { height: 100%; background: linear-gradient(90deg, #667eea, #764ba2); border-radius: 4px; }
    .list { list-style: none; padding: 0; margin: 0; }
    .list li { padding: 8px 0; border-bottom: 1px solid #f3f4f6; }
    .footer { background: #f9fafb; padding: 20px 30px; border: 1px solid #e5e7eb; border-top: none; text-align: center; color: #6b7280; font-size: 14px; }
  </style>
</head>
<body>
  <div class="container">
    <div class="header">
      <h1>New Project Estimate</h1>
      <p>Submitted {{ submitted_at }}</p>
    </div>
    <div class="content">
      <div class="estimate-card">
        <span class="tier-badge">{{ estimate.tier }} Tier</span>
        <p>{{ estimate.tier_description }}</p>
        <div class="stat-label">Investment</div>
        <div class="stat-value">{{ estimate.investment }}</div>
        <div class="stat-label">Timeline</div>
        <div class="stat-value">{{ estimate.timeline }}</div>
        <div class="stat-label">Fit Score: {{ estimate.fit_score }}%</div>
        <div class="fit-bar"><div class="fit-fill" style="width: {{ estimate.fit_score }}%;"></div></div>
        <p>{{ estimate.fit_assessment }}</p>
      </div>
{% for section in sections %}
      <div class="section">
        <div class="section-title">{{ section.title }}</div>
        <ul class="list">
{% for line in section.lines %}{% if line.items %}          <li><strong>{{ line.heading }}:</strong>
            <ul>{% for item in line.items %}<li>{{ item }}</li>{% endfor %}</ul>
          </li>
{% else %}          <li><strong>{{ line.heading }}:</strong> {{ line.value }}</li>
{% endif %}{% endfor %}        </ul>
      </div>
{% endfor %}
      <div class="section">
        <div class="section-title">Recommendations</div>
        <ul class="list">
{% for recommendation in estimate.recommendations %}          <li>{{ recommendation }}</li>
{% endfor %}        </ul>
      </div>
    </div>
    <div class="footer">YourTechAssist Project Estimator &middot; Lead {{ lead_id }}</div>
  </div>
</body>
</html>
"#;

const ESTIMATE_CLIENT_TEXT_TEMPLATE: &str = r#"Hi there,

Thanks for using the YourTechAssist project estimator. Here is a copy of your estimate.

Recommended Tier: {{ estimate.tier }}
{{ estimate.tier_description }}

Investment: {{ estimate.investment }}
Timeline: {{ estimate.timeline }}

What we'd build:
{% for feature in estimate.key_features %}- {{ feature }}
{% endfor %}
Our recommendations:
{% for recommendation in estimate.recommendations %}- {{ recommendation }}
{% endfor %}
Next steps:
{% for step in estimate.next_steps %}{{ loop.index }}. {{ step }}
{% endfor %}
This estimate is a starting point. Final pricing depends on detailed requirements.

Reference: {{ lead_id }}
"#;

const CONTACT_TEAM_TEXT_TEMPLATE: &str = r#"NEW CONTACT FORM SUBMISSION
===========================
Lead: {{ lead_id }}
Submitted: {{ submitted_at }}

CONTACT INFORMATION
-------------------
Name: {{ name }}
Email: {{ email }}
Company: {{ company | default(value="Not provided") }}
Phone: {{ phone | default(value="Not provided") }}

PROJECT DETAILS
---------------
Project Type: {{ project_type }}
Budget: {{ budget | default(value="Not specified") }}
Timeline: {{ timeline | default(value="Not specified") }}

MESSAGE
-------
{{ message }}
{% if has_estimate %}
PREVIOUS ESTIMATE DATA
----------------------
Tier: {{ estimate.tier }}
Investment: {{ estimate.investment }}
Timeline: {{ estimate.timeline }}
Fit Score: {{ estimate.fit_score }}%

Key Pain Points:
{% if pain_points %}{% for point in pain_points %}- {{ point }}
{% endfor %}{% else %}N/A
{% endif %}
Primary Goal: {{ primary_goal }}
{% elif has_raw_estimate %}
PREVIOUS ESTIMATE DATA (as submitted)
-------------------------------------
{{ raw_estimate }}
{% endif %}"#;

const CONTACT_TEAM_HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <style>
    body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: #333; }
    .container { max-width: 600px; margin: 0 auto; padding: 20px; }
    .header { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 30px; border-radius: 12px 12px 0 0; }
    .content { background: #fff; padding: 30px; border: 1px solid #e5e7eb; border-top: none; }
    .section { margin-bottom: 24px; }
    .section-title { font-size: 14px; font-weight: 600; color: #6b7280; text-transform: uppercase; margin-bottom: 12px; }
    .field { margin-bottom: 8px; }
    .field-label { font-weight: 600; color: #374151; }
    .message-box { background: #f9fafb; border-left: 4px solid #667eea; padding: 16px; white-space: pre-wrap; }
    .estimate-card { background: #f9fafb; border-radius: 12px; padding: 20px; }
    .tier-badge { display: inline-block; background: #667eea; color: white; padding: 4px 12px; border-radius: 20px; font-weight: 600; }
    .footer { background: #f9fafb; padding: 20px 30px; border: 1px solid #e5e7eb; border-top: none; text-align: center; color: #6b7280; font-size: 14px; }
  </style>
</head>
<body>
  <div class="container">
    <div class="header">
      <h1>New Contact Form Submission</h1>
      <p>Submitted {{ submitted_at }}</p>
    </div>
    <div class="content">
      <div class="section">
        <div class="section-title">Contact Information</div>
        <div class="field"><span class="field-label">Name:</span> {{ name }}</div>
        <div class="field"><span class="field-label">Email:</span> <a href="mailto:{{ email }}">{{ email }}</a></div>
        <div class="field"><span class="field-label">Company:</span> {{ company | default(value="Not provided") }}</div>
        <div class="field"><span class="field-label">Phone:</span> {{ phone | default(value="Not provided") }}</div>
      </div>
      <div class="section">
        <div class="section-title">Project Details</div>
        <div class="field"><span class="field-label">Project Type:</span> {{ project_type }}</div>
        <div class="field"><span class="field-label">Budget:</span> {{ budget | default(value="Not specified") }}</div>
        <div class="field"><span class="field-label">Timeline:</span> {{ timeline | default(value="Not specified") }}</div>
      </div>
      <div class="section">
        <div class="section-title">Message</div>
        <div class="message-box">{{ message }}</div>
      </div>
{% if has_estimate %}
      <div class="section">
        <div class="section-title">Previous Estimate</div>
        <div class="estimate-card">
          <span class="tier-badge">{{ estimate.tier }} Tier</span>
          <div class="field"><span class="field-label">Investment:</span> {{ estimate.investment }}</div>
          <div class="field"><span class="field-label">Timeline:</span> {{ estimate.timeline }}</div>
          <div class="field"><span class="field-label">Fit Score:</span> {{ estimate.fit_score }}%</div>
          <div class="field"><span class="field-label">Primary Goal:</span> {{ primary_goal }}</div>
          <div class="field-label">Key Pain Points:</div>
{% if pain_points %}          <ul>{% for point in pain_points %}<li>{{ point }}</li>{% endfor %}</ul>
{% else %}          <p>N/A</p>
{% endif %}        </div>
      </div>
{% elif has_raw_estimate %}
      <div class="section">
        <div class="section-title">Previous Estimate (as submitted)</div>
        <pre class="estimate-card">{{ raw_estimate }}</pre>
      </div>
{% endif %}
    </div>
    <div class="footer">YourTechAssist Contact Form &middot; Lead {{ lead_id }}</div>
  </div>
</body>
</html>
"#;

const CONTACT_CLIENT_TEXT_TEMPLATE: &str = r#"Hi {{ name }},

Thanks for reaching out to YourTechAssist about your {{ project_type }} project. We've received your message and will get back to you within one business day.
{% if has_estimate %}
We have your estimate on file:
Recommended Tier: {{ estimate.tier }}
Investment: {{ estimate.investment }}
Timeline: {{ estimate.timeline }}
{% endif %}
Reference: {{ lead_id }}
"#;

const ESTIMATE_SUMMARY_TEXT_TEMPLATE: &str = r#"{{ estimate.tier }} Tier
{{ estimate.tier_description }}

Investment: {{ estimate.investment }}
Timeline:   {{ estimate.timeline }}
Fit Score:  {{ estimate.fit_score }}% - {{ estimate.fit_assessment }}

Phases:
{% for phase in estimate.phases %}  {{ loop.index }}. {{ phase }}
{% endfor %}
Key Features:
{% for feature in estimate.key_features %}  - {{ feature }}
{% endfor %}
Recommendations:
{% for recommendation in estimate.recommendations %}  - {{ recommendation }}
{% endfor %}
Next Steps:
{% for step in estimate.next_steps %}  {{ loop.index }}. {{ step }}
{% endfor %}"#;
