//! End-to-end relationship analysis over a realistic archive model.

use std::collections::BTreeSet;

use jreverse_analysis::features::relationships::{
    DesignPattern, RelationKind, RelationStrength, RelationshipAnalyzer,
};
use jreverse_analysis::shared::models::{
    AnnotationFact, ClassFact, FieldFact, MethodFact, ProgramModel,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// A small pet-store archive: web -> service -> repository plus a
/// domain hierarchy and one hand-rolled singleton.
fn make_petstore_model() -> ProgramModel {
    ProgramModel::from_classes([
        ClassFact::class("com.petstore.web.OwnerController")
            .with_annotation(AnnotationFact::new("RestController"))
            .with_field(FieldFact::new("service", "com.petstore.service.OwnerService")),
        ClassFact::class("com.petstore.service.OwnerService")
            .with_annotation(AnnotationFact::new("Service"))
            .with_field(FieldFact::new(
                "repository",
                "com.petstore.repo.OwnerRepository",
            ))
            .with_method(
                MethodFact::new("findOwner", "com.petstore.model.Owner")
                    .with_parameter("id", "java.lang.String"),
            ),
        ClassFact::class("com.petstore.repo.OwnerRepository")
            .with_annotation(AnnotationFact::new("Repository"))
            .with_method(MethodFact::new("findById", "com.petstore.model.Owner"))
            .with_method(
                MethodFact::new("save", "com.petstore.model.Owner")
                    .with_parameter("owner", "com.petstore.model.Owner"),
            ),
        ClassFact::class("com.petstore.model.Owner")
            .with_superclass("com.petstore.model.Person")
            .with_field(FieldFact::new(
                "pets",
                "java.util.List<com.petstore.model.Pet>",
            )),
        ClassFact::class("com.petstore.model.Pet").with_superclass("com.petstore.model.Animal"),
        ClassFact::class("com.petstore.model.Animal"),
        ClassFact::class("com.petstore.model.Person"),
        ClassFact::class("com.petstore.boot.Registry")
            .with_field(
                FieldFact::new("INSTANCE", "com.petstore.boot.Registry").with_static(true),
            )
            .with_method(MethodFact::constructor().with_visibility(false, true))
            .with_method(
                MethodFact::new("getInstance", "com.petstore.boot.Registry").with_static(true),
            ),
    ])
}

#[test]
fn full_archive_analysis_succeeds() {
    let result = RelationshipAnalyzer::new().analyze(&make_petstore_model());

    assert!(result.successful);
    assert_eq!(result.error_message, None);
    assert_eq!(result.analyzed_class_count, 8);
    assert_eq!(result.skipped_class_count, 0);
}

#[test]
fn structural_edges_cover_the_domain_model() {
    let result = RelationshipAnalyzer::new().analyze(&make_petstore_model());

    let inheritance: BTreeSet<(&str, &str)> = result
        .relationships_of_kind(RelationKind::Inheritance)
        .iter()
        .map(|r| (r.source.as_str(), r.target.as_str()))
        .collect();
    assert_eq!(
        inheritance,
        BTreeSet::from([
            ("com.petstore.model.Owner", "com.petstore.model.Person"),
            ("com.petstore.model.Pet", "com.petstore.model.Animal"),
        ])
    );

    let compositions = result.relationships_of_kind(RelationKind::Composition);
    assert!(compositions
        .iter()
        .any(|r| r.source == "com.petstore.web.OwnerController"
            && r.target == "com.petstore.service.OwnerService"));

    let aggregations = result.relationships_of_kind(RelationKind::Aggregation);
    assert!(aggregations
        .iter()
        .any(|r| r.source == "com.petstore.model.Owner" && r.target == "com.petstore.model.Pet"));
}

#[test]
fn hierarchies_report_depth_and_subclasses() {
    let result = RelationshipAnalyzer::new().analyze(&make_petstore_model());

    let owner = result.hierarchy("com.petstore.model.Owner").unwrap();
    assert_eq!(owner.depth, 1);
    assert_eq!(owner.ancestors, vec!["com.petstore.model.Person".to_string()]);

    let animal = result.hierarchy("com.petstore.model.Animal").unwrap();
    assert_eq!(animal.depth, 0);
    assert!(animal.subclasses.contains("com.petstore.model.Pet"));
}

#[test]
fn repository_and_singleton_patterns_are_detected() {
    let result = RelationshipAnalyzer::new().analyze(&make_petstore_model());

    let repositories = result.patterns_of(DesignPattern::Repository);
    assert!(repositories
        .iter()
        .any(|p| p.class_name == "com.petstore.repo.OwnerRepository" && p.is_high_confidence()));

    let singletons = result.patterns_of(DesignPattern::Singleton);
    assert!(singletons
        .iter()
        .any(|p| p.class_name == "com.petstore.boot.Registry" && p.is_high_confidence()));
}

#[test]
fn metrics_stay_in_bounds_and_count_every_kind() {
    let result = RelationshipAnalyzer::new().analyze(&make_petstore_model());
    let metrics = &result.metrics;

    assert!((0.0..=1.0).contains(&metrics.coupling_index));
    assert!((0.0..=1.0).contains(&metrics.cohesion_index));
    let counted: usize = metrics.relationship_counts.values().sum();
    assert_eq!(counted, result.relationships.len());
}

#[test]
fn strengths_always_match_their_kind() {
    let result = RelationshipAnalyzer::new().analyze(&make_petstore_model());
    for rel in &result.relationships {
        assert_eq!(rel.strength, rel.kind.strength());
        if rel.kind == RelationKind::Inheritance {
            assert_eq!(rel.strength, RelationStrength::Strong);
        }
    }
}

#[test]
fn selective_analyzer_reports_only_requested_kinds() {
    let analyzer = RelationshipAnalyzer::with_kinds([RelationKind::Inheritance]);
    let result = analyzer.analyze(&make_petstore_model());

    assert!(result.successful);
    assert_eq!(result.relationships.len(), 2);
    assert!(result
        .relationships
        .iter()
        .all(|r| r.kind == RelationKind::Inheritance));
}

#[test]
fn malformed_class_is_skipped_without_failing_the_run() {
    let model = ProgramModel::from_classes([
        ClassFact::class(""),
        ClassFact::class("com.acme.Ok").with_field(FieldFact::new("peer", "com.acme.Peer")),
        ClassFact::class("com.acme.Peer"),
    ]);
    let result = RelationshipAnalyzer::new().analyze(&model);

    assert!(result.successful);
    assert_eq!(result.skipped_class_count, 1);
    assert_eq!(result.analyzed_class_count, 2);
    assert_eq!(result.relationships.len(), 1);
}

#[test]
fn run_fails_when_every_class_is_malformed() {
    let model = ProgramModel::from_classes([ClassFact::class("")]);
    let result = RelationshipAnalyzer::new().analyze(&model);

    assert!(!result.successful);
    let message = result.error_message.unwrap();
    assert!(message.contains("failed for all"), "got: {message}");
}

#[test]
fn shutdown_is_visible_across_threads() {
    let analyzer = RelationshipAnalyzer::new();
    std::thread::scope(|scope| {
        scope.spawn(|| analyzer.shutdown());
    });
    assert!(analyzer.is_shut_down());

    let result = analyzer.analyze(&make_petstore_model());
    assert!(!result.successful);
    assert_eq!(
        result.error_message.as_deref(),
        Some("Analyzer has been shut down")
    );
}

/// 80 classes crosses the parallel derivation threshold; output must
/// not depend on the partitioning.
#[test]
fn large_model_analysis_is_deterministic() {
    let classes: Vec<ClassFact> = (0..80)
        .map(|i| {
            let next = (i + 1) % 80;
            ClassFact::class(format!("com.generated.p{i}.Type{i}")).with_field(FieldFact::new(
                "next",
                format!("com.generated.p{next}.Type{next}"),
            ))
        })
        .collect();
    let model = ProgramModel::from_classes(classes);

    let analyzer = RelationshipAnalyzer::new();
    let first = analyzer.analyze(&model);
    let second = analyzer.analyze(&model);

    assert!(first.successful);
    assert_eq!(first.analyzed_class_count, 80);
    assert_eq!(first.relationships, second.relationships);
    assert_eq!(first.metrics, second.metrics);
}

proptest! {
    /// Chains of any length keep metric indices inside the unit interval.
    #[test]
    fn metric_indices_stay_normalized(class_count in 1usize..40) {
        let classes: Vec<ClassFact> = (0..class_count)
            .map(|i| {
                let mut fact = ClassFact::class(format!("com.chain.Link{i}"));
                if i + 1 < class_count {
                    fact = fact.with_field(FieldFact::new(
                        "next",
                        format!("com.chain.Link{}", i + 1),
                    ));
                }
                fact
            })
            .collect();
        let model = ProgramModel::from_classes(classes);

        let result = RelationshipAnalyzer::new().analyze(&model);
        prop_assert!(result.successful);
        prop_assert!((0.0..=1.0).contains(&result.metrics.coupling_index));
        prop_assert!((0.0..=1.0).contains(&result.metrics.cohesion_index));
    }
}
