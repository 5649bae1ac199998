//! End-to-end cycle detection over realistic dependency-injection graphs.

use std::collections::BTreeSet;

use jreverse_analysis::features::beans::{InjectionKind, InjectionPoint};
use jreverse_analysis::features::cycles::{
    find_cycles, CircularDependencyAnalyzer, CycleKind, CycleRisk, CycleSeverity, StrategyKind,
};
use jreverse_analysis::shared::models::{
    AnnotationFact, ClassFact, FieldFact, MethodFact, ParameterFact, ProgramModel,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn ctor_edge(source: &str, target: &str) -> InjectionPoint {
    InjectionPoint::new(source, target, InjectionKind::Constructor, "<init>")
}

fn field_edge(source: &str, target: &str) -> InjectionPoint {
    InjectionPoint::new(source, target, InjectionKind::Field, "dep")
}

/// Two services constructor-injecting each other, as the container
/// would see them.
fn make_ctor_pair_model(lazy_back_edge: bool) -> ProgramModel {
    let order = ClassFact::class("com.store.order.OrderService")
        .with_annotation(AnnotationFact::new("Service"))
        .with_method(
            MethodFact::constructor()
                .with_parameter("payments", "com.store.payment.PaymentService"),
        );

    let mut back_param = ParameterFact::new("orders", "com.store.order.OrderService");
    if lazy_back_edge {
        back_param = back_param.with_annotation(AnnotationFact::new("Lazy"));
    }
    let payment = ClassFact::class("com.store.payment.PaymentService")
        .with_annotation(AnnotationFact::new("Service"))
        .with_method(MethodFact::constructor().with_param_fact(back_param));

    ProgramModel::from_classes([order, payment])
}

#[test]
fn constructor_pair_in_a_model_is_a_critical_startup_failure() {
    let analyzer = CircularDependencyAnalyzer::new();
    let result = analyzer.analyze_model(&make_ctor_pair_model(false));

    assert!(result.successful);
    assert!(result.has_cycles());
    assert_eq!(result.cycles.len(), 1);
    assert_eq!(result.analyzed_edge_count, 2);
    assert_eq!(result.analyzed_class_count, 2);

    let cycle = &result.cycles[0];
    assert_eq!(
        cycle.cycle,
        vec![
            "com.store.order.OrderService".to_string(),
            "com.store.payment.PaymentService".into(),
            "com.store.order.OrderService".into(),
        ]
    );
    assert_eq!(cycle.kind, CycleKind::ConstructorOnly);
    assert_eq!(cycle.risk, CycleRisk::BeanCreationException);
    assert_eq!(cycle.severity, CycleSeverity::Critical);
    assert_eq!(cycle.injection_points.len(), 2);
    assert_eq!(result.critical_cycles().len(), 1);
}

#[test]
fn lazy_parameter_downgrades_the_startup_failure() {
    let analyzer = CircularDependencyAnalyzer::new();
    let result = analyzer.analyze_model(&make_ctor_pair_model(true));

    let cycle = &result.cycles[0];
    assert!(cycle.has_lazy_resolution);
    assert_eq!(cycle.risk, CycleRisk::PerformanceDegradation);
    assert_eq!(cycle.severity, CycleSeverity::Medium);
    assert!(result.critical_cycles().is_empty());
}

#[test]
fn field_triangle_is_enumerated_once_with_an_event_option() {
    let analyzer = CircularDependencyAnalyzer::new();
    let inventory = ClassFact::class("com.store.stock.InventoryService")
        .with_annotation(AnnotationFact::new("Service"))
        .with_field(
            FieldFact::new("orders", "com.store.order.OrderService")
                .with_annotation(AnnotationFact::new("Autowired")),
        );
    let order = ClassFact::class("com.store.order.OrderService")
        .with_annotation(AnnotationFact::new("Service"))
        .with_field(
            FieldFact::new("shipping", "com.store.ship.ShippingService")
                .with_annotation(AnnotationFact::new("Autowired")),
        );
    let shipping = ClassFact::class("com.store.ship.ShippingService")
        .with_annotation(AnnotationFact::new("Service"))
        .with_field(
            FieldFact::new("inventory", "com.store.stock.InventoryService")
                .with_annotation(AnnotationFact::new("Autowired")),
        );
    let result =
        analyzer.analyze_model(&ProgramModel::from_classes([inventory, order, shipping]));

    assert_eq!(result.cycles.len(), 1);
    let cycle = &result.cycles[0];
    assert_eq!(cycle.unique_class_count(), 3);
    assert_eq!(cycle.cycle[0], "com.store.order.OrderService");
    assert_eq!(cycle.kind, CycleKind::FieldOnly);
    assert_eq!(cycle.risk, CycleRisk::RuntimeDeadlock);

    let primary = cycle.primary_strategy().unwrap();
    assert_eq!(primary.kind, StrategyKind::LazyInitialization);
    assert!(cycle
        .resolution_strategies
        .iter()
        .any(|s| s.kind == StrategyKind::EventBasedDecoupling));
}

#[test]
fn overlapping_cycles_are_each_reported() {
    let analyzer = CircularDependencyAnalyzer::new();
    let points = vec![
        field_edge("com.a.A", "com.b.B"),
        field_edge("com.b.B", "com.a.A"),
        field_edge("com.b.B", "com.c.C"),
        field_edge("com.c.C", "com.b.B"),
    ];
    let result = analyzer.analyze(&points);

    assert_eq!(result.cycles.len(), 2);
    assert_eq!(
        result.cycles[0].cycle,
        vec!["com.a.A".to_string(), "com.b.B".into(), "com.a.A".into()]
    );
    assert_eq!(
        result.cycles[1].cycle,
        vec!["com.b.B".to_string(), "com.c.C".into(), "com.b.B".into()]
    );
    assert_eq!(result.cycles_containing("com.b.B").len(), 2);
}

#[test]
fn self_injection_inside_a_larger_cycle_is_still_reported() {
    let analyzer = CircularDependencyAnalyzer::new();
    let points = vec![
        field_edge("com.tx.TxService", "com.tx.TxService"),
        field_edge("com.tx.TxService", "com.audit.AuditService"),
        field_edge("com.audit.AuditService", "com.tx.TxService"),
    ];
    let result = analyzer.analyze(&points);

    assert_eq!(result.cycles.len(), 2);
    let self_cycles: Vec<_> = result.cycles.iter().filter(|c| c.is_self_cycle()).collect();
    assert_eq!(self_cycles.len(), 1);
    assert_eq!(self_cycles[0].unique_class_count(), 1);
    assert_eq!(result.cycles_containing("com.tx.TxService").len(), 2);
}

#[test]
fn mixed_kinds_add_the_event_strategy_even_for_pairs() {
    let analyzer = CircularDependencyAnalyzer::new();
    let result = analyzer.analyze(&[
        ctor_edge("com.a.A", "com.b.B"),
        field_edge("com.b.B", "com.a.A"),
    ]);

    let cycle = &result.cycles[0];
    assert_eq!(cycle.kind, CycleKind::MixedInjection);
    assert!(cycle
        .resolution_strategies
        .iter()
        .any(|s| s.kind == StrategyKind::EventBasedDecoupling));
    assert_eq!(result.cycles_of_kind(CycleKind::MixedInjection).len(), 1);
}

#[test]
fn acyclic_graph_reports_counts_but_no_cycles() {
    let analyzer = CircularDependencyAnalyzer::new();
    let points = vec![
        ctor_edge("com.web.Controller", "com.app.Service"),
        ctor_edge("com.app.Service", "com.data.Repository"),
        field_edge("com.jobs.Reporter", "com.app.Service"),
    ];
    let result = analyzer.analyze(&points);

    assert!(result.successful);
    assert!(!result.has_cycles());
    assert_eq!(result.analyzed_edge_count, 3);
    assert_eq!(result.analyzed_class_count, 4);
}

#[test]
fn edge_order_does_not_change_the_result() {
    let analyzer = CircularDependencyAnalyzer::new();
    let mut points = vec![
        field_edge("com.c.C", "com.a.A"),
        field_edge("com.a.A", "com.b.B"),
        field_edge("com.b.B", "com.c.C"),
        field_edge("com.b.B", "com.a.A"),
    ];
    let forward = analyzer.analyze(&points);
    points.reverse();
    let reversed = analyzer.analyze(&points);

    assert_eq!(forward.cycles, reversed.cycles);
}

/// A complete digraph on eight classes holds more simple cycles than
/// the exploration budget; detection must stop early instead of
/// hanging, keeping every reported path valid.
#[test]
fn dense_graph_detection_is_bounded() {
    let names: Vec<String> = (0..8).map(|i| format!("com.dense.Node{i}")).collect();
    let mut points = Vec::new();
    for source in &names {
        for target in &names {
            if source != target {
                points.push(field_edge(source, target));
            }
        }
    }

    let cycles = find_cycles(&points);
    assert!(!cycles.is_empty());
    assert!(cycles.len() <= 10_000);
    for cycle in &cycles {
        assert_eq!(cycle.first(), cycle.last());
        assert!(cycle.len() >= 3);
    }
}

proptest! {
    /// Every reported cycle is closed, repeat-free and backed by real
    /// edges, for arbitrary small graphs.
    #[test]
    fn reported_cycles_are_closed_and_edge_backed(
        edges in proptest::collection::vec((0usize..6, 0usize..6), 0..20)
    ) {
        let names: Vec<String> = (0..6).map(|i| format!("com.gen.C{i}")).collect();
        let points: Vec<InjectionPoint> = edges
            .iter()
            .map(|(s, t)| field_edge(&names[*s], &names[*t]))
            .collect();
        let edge_set: BTreeSet<(&str, &str)> = points
            .iter()
            .map(|p| (p.source_class.as_str(), p.target_class.as_str()))
            .collect();

        let cycles = find_cycles(&points);
        for cycle in &cycles {
            prop_assert!(cycle.len() >= 2);
            prop_assert_eq!(cycle.first(), cycle.last());
            for pair in cycle.windows(2) {
                prop_assert!(edge_set.contains(&(pair[0].as_str(), pair[1].as_str())));
            }
            let distinct: BTreeSet<&String> = cycle[..cycle.len() - 1].iter().collect();
            prop_assert_eq!(distinct.len(), cycle.len() - 1);
        }
    }
}
