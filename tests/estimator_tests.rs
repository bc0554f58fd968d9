// Integration tests for the estimate calculator against the builtin catalog
// Covers the two reference questionnaires, empty input and lenient coercion

#[cfg(test)]
mod estimator_tests {
    use techassist_lib::models::{AnswerSet, Span, Tier};
    use techassist_lib::scoring;
    use techassist_lib::wizard;
    use techassist_lib::Estimator;

    fn scenario_a() -> AnswerSet {
        AnswerSet::new()
            .with_single("project_type", "saas_product")
            .with_single("current_state", "scratch")
            .with_multiple("pain_points", &[])
            .with_single("pain_severity", "medium")
            .with_single("primary_goal", "scale")
            .with_single("success_metric", "capacity")
            .with_single("user_count", "large")
            .with_multiple(
                "features",
                &["auth", "payments", "reporting", "integrations", "realtime", "roles"],
            )
            .with_single("timeline", "standard")
            .with_single("budget_range", "scale")
            .with_single("decision_maker", "committee")
            .with_single("timeline_decision", "planning")
    }

    fn scenario_b() -> AnswerSet {
        AnswerSet::new()
            .with_single("project_type", "internal_tool")
            .with_single("current_state", "manual")
            .with_single("pain_severity", "critical")
            .with_single("timeline", "asap")
            .with_multiple("features", &["auth"])
            .with_single("user_count", "solo")
            .with_single("budget_range", "starter")
            .with_single("decision_maker", "solo")
            .with_single("timeline_decision", "immediate")
    }

    #[test]
    fn test_scenario_a_totals() {
        let estimator = Estimator::builtin();
        let totals = scoring::accumulate(&scenario_a(), estimator.catalog());

        assert_eq!(totals.complexity, 17);
        assert_eq!(totals.cost, 17);
        assert_eq!(totals.timeline, 12);
        assert_eq!(totals.tier_score(), 34);
    }

    #[test]
    fn test_scenario_a_estimate() {
        let result = Estimator::builtin().estimate(&scenario_a());

        // 34 is past the Growth ceiling of 25
        assert_eq!(result.tier, Tier::Enterprise);
        assert_eq!(result.price_range, Span::new(150_000, 300_000));
        // base 24-40 weeks, +2 per timeline point
        assert_eq!(result.timeline_weeks, Span::new(48, 64));

        assert!(result
            .phases
            .contains(&"Core Platform Development".to_string()));
        assert!(result.phases.contains(&"Integration & Testing".to_string()));
        assert!(!result.phases.contains(&"Development".to_string()));

        assert_eq!(
            result.key_features,
            vec![
                "Secure user authentication system",
                "Payment processing integration",
                "Custom reporting dashboard",
                "Third-party system integrations",
                "Real-time data updates",
                "Role-based access control",
            ]
        );
        assert_eq!(
            result.recommendations,
            vec!["With multiple features, we recommend prioritizing a core MVP first to get value sooner."]
        );

        // "scale" budget does not cover Enterprise; committee and planning add nothing
        assert_eq!(result.fit_score, 70);
        assert!(result.fit_assessment.starts_with("Good fit!"));
    }

    #[test]
    fn test_scenario_b_estimate() {
        let result = Estimator::builtin().estimate(&scenario_b());

        assert_eq!(result.tier, Tier::Starter);
        assert_eq!(result.price_range, Span::new(5_000, 15_000));
        assert_eq!(result.timeline_weeks, Span::new(4, 6));

        assert_eq!(
            result.recommendations,
            vec![
                "Start by documenting your current manual processes to ensure nothing is missed in the automation.",
                "Consider a phased approach - launch core functionality fast, then iterate based on real usage.",
                "For faster delivery, focus on must-have features first. Nice-to-haves can come in phase 2.",
            ]
        );

        // base 70, +15 starter budget, +10 immediate, +5 solo
        assert!(result.fit_score >= 80);
        assert_eq!(result.fit_score, 100);
        assert!(result.fit_assessment.starts_with("Excellent fit!"));
        assert_eq!(result.key_features, vec!["Secure user authentication system"]);
    }

    #[test]
    fn test_scenario_b_is_incomplete_for_submission() {
        let estimator = Estimator::builtin();
        // pain points, goal and success metric were never answered
        let err = wizard::validate_required(&scenario_b(), estimator.catalog()).unwrap_err();
        assert!(err.to_string().starts_with("Please complete step"));
        assert!(wizard::validate_required(&scenario_a(), estimator.catalog()).is_err());
    }

    #[test]
    fn test_empty_answers_yield_starter_baseline() {
        let result = Estimator::builtin().estimate(&AnswerSet::new());

        assert_eq!(result.tier, Tier::Starter);
        assert_eq!(result.timeline_weeks, Span::new(4, 8));
        assert_eq!(result.key_features, vec!["Custom solution tailored to your needs"]);
        assert_eq!(result.recommendations.len(), 1);
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let estimator = Estimator::builtin();
        let answers = scenario_a();
        assert_eq!(estimator.estimate(&answers), estimator.estimate(&answers));
    }

    #[test]
    fn test_malformed_answers_are_coerced_or_ignored() {
        let answers: AnswerSet = serde_json::from_str(
            r#"{
                "project_type": ["saas_product"],
                "user_count": ["large", "public"],
                "features": "auth",
                "budget_range": 42,
                "unknown_question": "whatever"
            }"#,
        )
        .unwrap();

        let estimator = Estimator::builtin();
        let result = estimator.estimate(&answers);
        let totals = scoring::accumulate(&answers, estimator.catalog());

        // saas_product (3,3,3) from the one-element array, auth (1,1,1) from the scalar,
        // the two-element single answer and the number contribute nothing
        assert_eq!(totals.complexity, 4);
        assert_eq!(totals.cost, 4);
        assert_eq!(result.tier, Tier::Starter);
        assert_eq!(result.key_features, vec!["Secure user authentication system"]);
    }

    #[test]
    fn test_estimate_result_json_shape() {
        let result = Estimator::builtin().estimate(&scenario_b());
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["tier"], "Starter");
        assert_eq!(json["priceRange"]["min"], 5000);
        assert_eq!(json["timelineWeeks"]["max"], 6);
        assert_eq!(json["fitScore"], 100);
        assert!(json["nextSteps"].is_array());
    }
}
