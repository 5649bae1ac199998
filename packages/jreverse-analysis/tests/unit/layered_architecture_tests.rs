//! End-to-end layered-architecture analysis over a five-tier archive.

use jreverse_analysis::features::layering::{
    LayerType, LayeredArchitectureAnalyzer, ViolationKind, ViolationSeverity,
};
use jreverse_analysis::shared::models::{
    AnnotationFact, ClassFact, FieldFact, MethodFact, ProgramModel,
};
use pretty_assertions::assert_eq;

/// Web-shop archive spanning all five tiers. Known defects: the
/// service skips the domain tier into persistence, and one DAO holds a
/// controller reference.
fn make_shop_model() -> ProgramModel {
    ProgramModel::from_classes([
        ClassFact::class("com.shop.web.CheckoutController")
            .with_annotation(AnnotationFact::new("RestController"))
            .with_field(FieldFact::new(
                "checkout",
                "com.shop.application.CheckoutService",
            )),
        ClassFact::class("com.shop.application.CheckoutService")
            .with_annotation(AnnotationFact::new("Service"))
            .with_field(FieldFact::new("cart", "com.shop.domain.Cart"))
            .with_field(FieldFact::new("orders", "com.shop.data.OrderRepository")),
        ClassFact::class("com.shop.data.OrderRepository")
            .with_annotation(AnnotationFact::new("Repository")),
        ClassFact::class("com.shop.domain.Cart")
            .with_annotation(AnnotationFact::new("jakarta.persistence.Entity"))
            .with_field(FieldFact::new(
                "items",
                "java.util.List<com.shop.domain.LineItem>",
            )),
        ClassFact::class("com.shop.domain.LineItem")
            .with_annotation(AnnotationFact::new("jakarta.persistence.Entity")),
        ClassFact::class("com.shop.config.AppConfig")
            .with_annotation(AnnotationFact::new("Configuration")),
        ClassFact::class("com.shop.util.JsonHelper"),
        ClassFact::class("com.shop.data.ReportingDao").with_field(FieldFact::new(
            "controller",
            "com.shop.web.CheckoutController",
        )),
    ])
}

#[test]
fn indicator_sources_all_count_toward_the_threshold() {
    let analyzer = LayeredArchitectureAnalyzer::new();

    // Annotation, name suffix and package segment: one of each
    let mixed = ProgramModel::from_classes([
        ClassFact::class("com.acme.a.Checkout").with_annotation(AnnotationFact::new("Service")),
        ClassFact::class("com.acme.b.ReportingDao"),
        ClassFact::class("com.acme.web.Pages"),
    ]);
    assert!(analyzer.can_analyze(&mixed));

    let unlayered = ProgramModel::from_classes([
        ClassFact::class("com.acme.a.One"),
        ClassFact::class("com.acme.b.Two"),
        ClassFact::class("com.acme.c.Three"),
    ]);
    assert!(!analyzer.can_analyze(&unlayered));
}

#[test]
fn every_class_gets_exactly_one_layer() {
    let analyzer = LayeredArchitectureAnalyzer::new();
    let result = analyzer.analyze(&make_shop_model()).unwrap();

    assert_eq!(result.layer_assignments.len(), 8);
    assert_eq!(
        result.layer_of("com.shop.web.CheckoutController"),
        Some(LayerType::Presentation)
    );
    assert_eq!(
        result.layer_of("com.shop.application.CheckoutService"),
        Some(LayerType::Business)
    );
    assert_eq!(
        result.layer_of("com.shop.domain.Cart"),
        Some(LayerType::Domain)
    );
    assert_eq!(
        result.layer_of("com.shop.data.ReportingDao"),
        Some(LayerType::Persistence)
    );
    assert_eq!(
        result.layer_of("com.shop.config.AppConfig"),
        Some(LayerType::Infrastructure)
    );
    // No annotation, no suffix, "util" package segment
    assert_eq!(
        result.layer_of("com.shop.util.JsonHelper"),
        Some(LayerType::Infrastructure)
    );
}

#[test]
fn cross_layer_dependencies_carry_reference_strengths() {
    let analyzer = LayeredArchitectureAnalyzer::new();
    let result = analyzer.analyze(&make_shop_model()).unwrap();

    assert_eq!(result.dependencies.len(), 4);

    let strength_of = |source: &str, target: &str| -> f64 {
        result
            .dependencies
            .iter()
            .find(|d| d.source_class == source && d.target_class == target)
            .map(|d| d.strength)
            .unwrap_or(f64::NAN)
    };

    // The controller's only reference is the service
    assert_eq!(
        strength_of(
            "com.shop.web.CheckoutController",
            "com.shop.application.CheckoutService"
        ),
        1.0
    );
    // The service splits its two references across two layers
    assert_eq!(
        strength_of("com.shop.application.CheckoutService", "com.shop.domain.Cart"),
        0.5
    );
    assert_eq!(
        strength_of(
            "com.shop.application.CheckoutService",
            "com.shop.data.OrderRepository"
        ),
        0.5
    );
    assert_eq!(
        strength_of("com.shop.data.ReportingDao", "com.shop.web.CheckoutController"),
        1.0
    );
}

#[test]
fn upward_and_skip_violations_are_flagged_and_sorted() {
    let analyzer = LayeredArchitectureAnalyzer::new();
    let result = analyzer.analyze(&make_shop_model()).unwrap();

    assert_eq!(result.violations.len(), 2);

    // Sorted most severe first
    let first = &result.violations[0];
    assert_eq!(first.kind, ViolationKind::UpwardDependency);
    assert_eq!(first.severity, ViolationSeverity::Critical);
    assert_eq!(first.source_layer, LayerType::Persistence);
    assert_eq!(first.target_layer, LayerType::Presentation);
    assert_eq!(first.source_package, "com.shop.data");
    assert_eq!(first.impact_score, 1.0);

    let second = &result.violations[1];
    assert_eq!(second.kind, ViolationKind::SkipLayerDependency);
    assert_eq!(second.severity, ViolationSeverity::Medium);
    assert_eq!(second.source_layer, LayerType::Business);
    assert_eq!(second.target_layer, LayerType::Persistence);
    assert!(second.description.contains("business layer class"));
}

#[test]
fn compliance_and_integrity_reflect_the_violations() {
    let analyzer = LayeredArchitectureAnalyzer::new();
    let result = analyzer.analyze(&make_shop_model()).unwrap();

    // 8 classes, weights 1.0 (critical) + 0.5 (medium)
    assert_eq!(result.compliance_score, 0.8125);
    assert!(result.architectural_integrity > 0.0);
    assert!(result.architectural_integrity < 1.0);
}

#[test]
fn layer_summaries_are_rank_ordered_and_scored() {
    let analyzer = LayeredArchitectureAnalyzer::new();
    let result = analyzer.analyze(&make_shop_model()).unwrap();

    assert_eq!(result.layers.len(), 5);
    let ranks: Vec<u8> = result.layers.iter().map(|l| l.layer.rank()).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4, 5]);

    let domain = result.layer_summary(LayerType::Domain).unwrap();
    assert_eq!(domain.class_count(), 2);
    assert!(domain.classes.contains("com.shop.domain.Cart"));
    assert!(domain.classes.contains("com.shop.domain.LineItem"));
    // Same package, no shared interfaces
    assert!((domain.cohesion - 0.5).abs() < 1e-9);

    // Nothing depends on or from infrastructure here
    let infra = result.layer_summary(LayerType::Infrastructure).unwrap();
    assert_eq!(infra.coupling, 0.0);
}

#[test]
fn recommendations_target_each_violation_kind() {
    let analyzer = LayeredArchitectureAnalyzer::new();
    let result = analyzer.analyze(&make_shop_model()).unwrap();

    assert_eq!(result.recommendations.len(), 2);

    let upward = result
        .recommendations
        .iter()
        .find(|r| r.kind == Some(ViolationKind::UpwardDependency))
        .unwrap();
    assert_eq!(upward.priority, ViolationSeverity::Critical);
    assert_eq!(upward.affected_count, 1);

    let skip = result
        .recommendations
        .iter()
        .find(|r| r.kind == Some(ViolationKind::SkipLayerDependency))
        .unwrap();
    assert_eq!(skip.priority, ViolationSeverity::Medium);
}

#[test]
fn strictly_adjacent_downward_edges_are_clean() {
    let analyzer = LayeredArchitectureAnalyzer::new();
    let model = ProgramModel::from_classes([
        ClassFact::class("com.shop.web.CheckoutController")
            .with_annotation(AnnotationFact::new("RestController"))
            .with_field(FieldFact::new(
                "checkout",
                "com.shop.application.CheckoutService",
            )),
        ClassFact::class("com.shop.application.CheckoutService")
            .with_annotation(AnnotationFact::new("Service"))
            .with_method(
                MethodFact::new("checkout", "com.shop.domain.Cart")
                    .with_parameter("cart", "com.shop.domain.Cart"),
            ),
        ClassFact::class("com.shop.domain.Cart")
            .with_annotation(AnnotationFact::new("jakarta.persistence.Entity")),
    ]);
    let result = analyzer.analyze(&model).unwrap();

    assert!(result.successful);
    assert_eq!(result.dependencies.len(), 2);
    assert!(result.violations.is_empty());
    assert_eq!(result.compliance_score, 1.0);
    assert!(result.recommendations.is_empty());
}

#[test]
fn blank_class_name_fails_the_precondition() {
    let analyzer = LayeredArchitectureAnalyzer::new();
    let model = ProgramModel::from_classes([
        ClassFact::class("com.shop.web.CheckoutController")
            .with_annotation(AnnotationFact::new("RestController")),
        ClassFact::class("   "),
    ]);

    let error = analyzer.analyze(&model).unwrap_err();
    assert!(error.to_string().starts_with("Malformed program model"));
}
