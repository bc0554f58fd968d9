// Built-in estimator questionnaire

use crate::models::{Question, QuestionCategory, QuestionOption, QuestionType, StepInfo, Weight};

/// Question ids the estimator rules match on
pub const PROJECT_TYPE: &str = "project_type";
pub const CURRENT_STATE: &str = "current_state";
pub const PAIN_POINTS: &str = "pain_points";
pub const PAIN_SEVERITY: &str = "pain_severity";
pub const PRIMARY_GOAL: &str = "primary_goal";
pub const SUCCESS_METRIC: &str = "success_metric";
pub const USER_COUNT: &str = "user_count";
pub const FEATURES: &str = "features";
pub const TIMELINE: &str = "timeline";
pub const BUDGET_RANGE: &str = "budget_range";
pub const DECISION_MAKER: &str = "decision_maker";
pub const TIMELINE_DECISION: &str = "timeline_decision";

fn weight(complexity: i32, timeline: i32, cost: i32) -> Option<Weight> {
    Some(Weight::new(complexity, timeline, cost))
}

fn option(id: &str, label: &str, description: &str, weight: Option<Weight>) -> QuestionOption {
    QuestionOption {
        id: id.to_string(),
        label: label.to_string(),
        description: Some(description.to_string()),
        weight,
    }
}

struct Prompt<'a> {
    id: &'a str,
    step: u8,
    kind: QuestionType,
    category: QuestionCategory,
    question: &'a str,
    subtitle: &'a str,
    insight: Option<&'a str>,
    summary_label: &'a str,
}

impl Prompt<'_> {
    fn with_options(self, options: Vec<QuestionOption>) -> Question {
        Question {
            id: self.id.to_string(),
            step: self.step,
            kind: self.kind,
            category: self.category,
            question: self.question.to_string(),
            subtitle: Some(self.subtitle.to_string()),
            insight: self.insight.map(str::to_string),
            summary_label: Some(self.summary_label.to_string()),
            options,
            required: true,
        }
    }
}

/// Wizard page titles
pub fn steps() -> Vec<StepInfo> {
    [
        (1, "Your Situation", "Tell us about your project"),
        (2, "Pain Points", "What challenges are you facing?"),
        (3, "Goals", "What does success look like?"),
        (4, "Scope", "What do you need built?"),
        (5, "Timeline & Budget", "Planning your investment"),
        (6, "Next Steps", "Ready to move forward?"),
    ]
    .into_iter()
    .map(|(step, title, description)| StepInfo {
        step,
        title: title.to_string(),
        description: description.to_string(),
    })
    .collect()
}

/// All questions in wizard order
pub fn questions() -> Vec<Question> {
    vec![
        // Step 1: current situation
        Prompt {
            id: PROJECT_TYPE,
            step: 1,
            kind: QuestionType::Single,
            category: QuestionCategory::Situation,
            question: "What type of solution are you looking to build?",
            subtitle: "This helps us understand the general direction of your project.",
            insight: None,
            summary_label: "Project Type",
        }
        .with_options(vec![
            option(
                "internal_tool",
                "Internal Tool / Dashboard",
                "For your team to manage operations, track data, or streamline workflows",
                weight(1, 1, 1),
            ),
            option(
                "customer_portal",
                "Customer-Facing Portal",
                "A platform where your customers can log in, manage accounts, or access services",
                weight(2, 2, 2),
            ),
            option(
                "saas_product",
                "SaaS Product",
                "A software product you want to sell to other businesses or consumers",
                weight(3, 3, 3),
            ),
            option(
                "ecommerce",
                "E-commerce / Marketplace",
                "Online store, booking platform, or multi-vendor marketplace",
                weight(3, 3, 3),
            ),
            option(
                "mobile_app",
                "Mobile Application",
                "iOS, Android, or cross-platform mobile app",
                weight(3, 3, 3),
            ),
            option(
                "other",
                "Something Else",
                "I have a unique idea that doesn't fit these categories",
                weight(2, 2, 2),
            ),
        ]),
        Prompt {
            id: CURRENT_STATE,
            step: 1,
            kind: QuestionType::Single,
            category: QuestionCategory::Situation,
            question: "Where are you starting from?",
            subtitle: "Understanding your current state helps us plan the right approach.",
            insight: Some(
                "Projects that replace manual processes often see the fastest ROI because we can measure the time saved immediately.",
            ),
            summary_label: "Current State",
        }
        .with_options(vec![
            option(
                "scratch",
                "Starting Fresh",
                "This is a new idea - I don't have anything built yet",
                weight(0, 0, 0),
            ),
            option(
                "manual",
                "Manual Processes / Spreadsheets",
                "I'm doing this manually with spreadsheets, emails, or paper",
                weight(0, -1, 0),
            ),
            option(
                "legacy",
                "Replacing Old System",
                "I have an existing system that needs to be replaced or modernized",
                weight(1, 1, 1),
            ),
            option(
                "prototype",
                "Have a Prototype/MVP",
                "I have something basic built that needs to be scaled or rebuilt properly",
                weight(1, 0, 1),
            ),
            option(
                "enhancement",
                "Adding to Existing Product",
                "I have a working product and need to add new features",
                weight(1, -1, 0),
            ),
        ]),
        // Step 2: pain points
        Prompt {
            id: PAIN_POINTS,
            step: 2,
            kind: QuestionType::Multiple,
            category: QuestionCategory::Pain,
            question: "What challenges are you facing right now?",
            subtitle: "Select all that apply. This helps us understand what problems we need to solve.",
            insight: Some(
                "The most successful projects solve specific, measurable problems. The more pain points you identify, the more value we can deliver.",
            ),
            summary_label: "Pain Points",
        }
        .with_options(vec![
            option(
                "time_waste",
                "Too Much Manual Work",
                "Spending hours on repetitive tasks that could be automated",
                weight(1, 0, 1),
            ),
            option(
                "no_visibility",
                "Lack of Visibility",
                "Can't easily see what's happening across the business",
                weight(1, 0, 1),
            ),
            option(
                "scattered_data",
                "Data in Too Many Places",
                "Information spread across spreadsheets, emails, and different tools",
                weight(2, 0, 1),
            ),
            option(
                "poor_cx",
                "Poor Customer Experience",
                "Customers complaining about slow responses or confusing processes",
                weight(2, 0, 2),
            ),
            option(
                "scaling",
                "Struggling to Scale",
                "Current processes break down as we grow",
                weight(2, 0, 2),
            ),
            option(
                "errors",
                "Too Many Errors",
                "Manual processes leading to mistakes and rework",
                weight(1, 0, 1),
            ),
            option(
                "communication",
                "Communication Gaps",
                "Team members or customers not staying on the same page",
                weight(1, 0, 1),
            ),
        ]),
        Prompt {
            id: PAIN_SEVERITY,
            step: 2,
            kind: QuestionType::Single,
            category: QuestionCategory::Pain,
            question: "How urgent is solving these problems?",
            subtitle: "Be honest - this helps us prioritize and plan realistically.",
            insight: None,
            summary_label: "Urgency",
        }
        .with_options(vec![
            option(
                "critical",
                "Critical - Losing Money Daily",
                "These problems are actively costing us customers or significant money",
                weight(0, -2, 0),
            ),
            option(
                "high",
                "High - Major Inefficiency",
                "We're wasting significant time and resources",
                weight(0, -1, 0),
            ),
            option(
                "medium",
                "Medium - Need to Address Soon",
                "It's not an emergency but needs to be fixed in the next few months",
                weight(0, 0, 0),
            ),
            option(
                "low",
                "Planning Ahead",
                "We're being proactive - want to solve this before it becomes critical",
                weight(0, 1, 0),
            ),
        ]),
        // Step 3: goals
        Prompt {
            id: PRIMARY_GOAL,
            step: 3,
            kind: QuestionType::Single,
            category: QuestionCategory::Goals,
            question: "What is the #1 outcome you want from this project?",
            subtitle: "If we could only deliver one thing, what would make this project a success?",
            insight: Some(
                "Projects with a clear primary goal are 3x more likely to succeed. We can add features, but we need one north star.",
            ),
            summary_label: "Primary Goal",
        }
        .with_options(vec![
            option("save_time", "Save Time", "Free up hours every week by automating manual work", None),
            option(
                "increase_revenue",
                "Increase Revenue",
                "Create new revenue streams or improve conversion rates",
                None,
            ),
            option("reduce_errors", "Reduce Errors", "Eliminate mistakes from manual processes", None),
            option(
                "better_cx",
                "Improve Customer Experience",
                "Make it easier and more enjoyable for customers to work with us",
                None,
            ),
            option(
                "scale",
                "Enable Growth",
                "Build infrastructure that can handle 10x our current volume",
                None,
            ),
            option("visibility", "Gain Visibility", "See real-time data and make better decisions", None),
        ]),
        Prompt {
            id: SUCCESS_METRIC,
            step: 3,
            kind: QuestionType::Single,
            category: QuestionCategory::Goals,
            question: "How will you measure success?",
            subtitle: "Having a clear metric helps us design the right solution.",
            insight: None,
            summary_label: "Success Metric",
        }
        .with_options(vec![
            option("time_saved", "Hours Saved Per Week", "Measuring reduction in manual work", None),
            option(
                "revenue_increase",
                "Revenue or Conversion Increase",
                "Measuring financial impact",
                None,
            ),
            option("error_reduction", "Error Rate Reduction", "Measuring quality improvement", None),
            option(
                "customer_satisfaction",
                "Customer Satisfaction Score",
                "Measuring experience improvement",
                None,
            ),
            option("capacity", "Capacity Increase", "Handling more volume with same resources", None),
            option("not_sure", "I'm Not Sure Yet", "Help me figure out the right metrics", None),
        ]),
        // Step 4: scope
        Prompt {
            id: USER_COUNT,
            step: 4,
            kind: QuestionType::Single,
            category: QuestionCategory::Scope,
            question: "How many people will use this system?",
            subtitle: "This affects infrastructure, security, and complexity.",
            insight: None,
            summary_label: "Users",
        }
        .with_options(vec![
            option("solo", "Just Me", "Personal tool or solo operation", weight(0, 0, 0)),
            option("small_team", "2-10 Users", "Small team or department", weight(1, 0, 1)),
            option("medium_team", "11-50 Users", "Medium-sized organization", weight(2, 0, 2)),
            option("large", "50+ Internal Users", "Large organization with many employees", weight(3, 0, 3)),
            option(
                "public",
                "Public / Customer-Facing",
                "Potentially hundreds or thousands of external users",
                weight(4, 0, 4),
            ),
        ]),
        Prompt {
            id: FEATURES,
            step: 4,
            kind: QuestionType::Multiple,
            category: QuestionCategory::Scope,
            question: "What capabilities do you need?",
            subtitle: "Select all that apply. Each adds complexity but also value.",
            insight: Some(
                "Start with must-haves. We can always add features in phases - launching sooner means getting value sooner.",
            ),
            summary_label: "Features",
        }
        .with_options(vec![
            option("auth", "User Accounts & Login", "Users can create accounts and log in securely", weight(1, 1, 1)),
            option("payments", "Payment Processing", "Accept payments, subscriptions, or invoicing", weight(2, 2, 2)),
            option(
                "integrations",
                "Third-Party Integrations",
                "Connect with other tools (CRM, accounting, etc.)",
                weight(2, 2, 2),
            ),
            option("reporting", "Reporting & Analytics", "Dashboards, charts, and data exports", weight(2, 1, 1)),
            option("notifications", "Email/SMS Notifications", "Automated alerts and communications", weight(1, 1, 1)),
            option(
                "file_upload",
                "File Uploads & Storage",
                "Users can upload and manage documents/images",
                weight(1, 1, 1),
            ),
            option(
                "roles",
                "Multiple User Roles",
                "Different permission levels (admin, manager, user)",
                weight(2, 1, 1),
            ),
            option("mobile", "Mobile-Friendly", "Works well on phones and tablets", weight(1, 1, 1)),
            option("realtime", "Real-Time Updates", "Live data without refreshing the page", weight(2, 2, 2)),
        ]),
        // Step 5: timeline & budget
        Prompt {
            id: TIMELINE,
            step: 5,
            kind: QuestionType::Single,
            category: QuestionCategory::Timeline,
            question: "When do you need this completed?",
            subtitle: "Be realistic - rushed timelines often lead to compromises.",
            insight: Some(
                "Quality software takes time. We'd rather be honest about timelines than over-promise and under-deliver.",
            ),
            summary_label: "Timeline",
        }
        .with_options(vec![
            option("asap", "ASAP (1-2 months)", "Urgent - willing to prioritize speed over features", weight(0, -2, 2)),
            option("soon", "Soon (2-4 months)", "Important but not emergency", weight(0, -1, 1)),
            option("standard", "Standard (4-6 months)", "Comfortable timeline for a quality build", weight(0, 0, 0)),
            option("relaxed", "Flexible (6+ months)", "No rush - want to do it right", weight(0, 1, -1)),
        ]),
        Prompt {
            id: BUDGET_RANGE,
            step: 5,
            kind: QuestionType::Single,
            category: QuestionCategory::Timeline,
            question: "What investment are you considering?",
            subtitle: "This helps us recommend the right approach and scope.",
            insight: Some(
                "Custom software is an investment that pays dividends. Most of our clients see ROI within 6-12 months through time savings and efficiency gains.",
            ),
            summary_label: "Budget",
        }
        .with_options(vec![
            option("exploring", "Not Sure Yet", "I'm still exploring what's possible", None),
            option("starter", "Under $25,000", "Good for focused MVPs and simple tools", weight(0, 0, 0)),
            option("growth", "$25,000 - $75,000", "Good for feature-rich applications", weight(0, 0, 1)),
            option("scale", "$75,000 - $150,000", "Good for complex, multi-feature platforms", weight(0, 0, 2)),
            option(
                "enterprise",
                "$150,000+",
                "Enterprise-grade solutions with advanced requirements",
                weight(0, 0, 3),
            ),
        ]),
        // Step 6: readiness
        Prompt {
            id: DECISION_MAKER,
            step: 6,
            kind: QuestionType::Single,
            category: QuestionCategory::Readiness,
            question: "Who is involved in this decision?",
            subtitle: "Understanding your team helps us tailor our approach.",
            insight: None,
            summary_label: "Decision Maker",
        }
        .with_options(vec![
            option("solo", "Just Me", "I make the final call", None),
            option("small_team", "Small Team (2-3 people)", "A few stakeholders to align", None),
            option("committee", "Multiple Stakeholders", "Several departments or executives involved", None),
            option("board", "Board / Executive Approval", "Requires formal approval process", None),
        ]),
        Prompt {
            id: TIMELINE_DECISION,
            step: 6,
            kind: QuestionType::Single,
            category: QuestionCategory::Readiness,
            question: "When are you looking to make a decision?",
            subtitle: "This helps us understand your timeline for moving forward.",
            insight: None,
            summary_label: "Decision Timeline",
        }
        .with_options(vec![
            option("immediate", "Ready Now", "Looking to start in the next 2-4 weeks", None),
            option("soon", "Within 1-2 Months", "Actively evaluating options", None),
            option("planning", "Within 3-6 Months", "Planning and budgeting phase", None),
            option("research", "Just Researching", "Exploring possibilities for the future", None),
        ]),
    ]
}
