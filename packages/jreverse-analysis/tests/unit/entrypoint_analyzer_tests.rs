//! End-to-end entrypoint reconstruction over a realistic boot archive.

use jreverse_analysis::features::entrypoints::{EntrypointAnalyzer, HttpMethod};
use jreverse_analysis::shared::models::{AnnotationFact, ClassFact, MethodFact, ProgramModel};
use pretty_assertions::assert_eq;

/// A small travel-booking archive: one REST controller, one job
/// component, one async mail service, and the boot application class.
fn booking_classes() -> Vec<ClassFact> {
    let application = ClassFact::class("com.travel.BookingApplication")
        .with_annotation(AnnotationFact::new("SpringBootApplication"))
        .with_method(MethodFact::new("main", "void").with_static(true));

    let controller = ClassFact::class("com.travel.web.BookingController")
        .with_annotation(AnnotationFact::new("RestController"))
        .with_annotation(AnnotationFact::new("RequestMapping").with_attr("value", "/api/bookings"))
        .with_method(
            MethodFact::new("list", "java.util.List<com.travel.Booking>")
                .with_annotation(AnnotationFact::new("GetMapping")),
        )
        .with_method(
            MethodFact::new("find", "com.travel.Booking").with_annotation(
                AnnotationFact::new("GetMapping").with_attr("value", "/{bookingId}"),
            ),
        )
        .with_method(
            MethodFact::new("create", "com.travel.Booking").with_annotation(
                AnnotationFact::new("PostMapping")
                    .with_attr("consumes", "application/json")
                    .with_attr("produces", "application/json"),
            ),
        )
        .with_method(
            MethodFact::new("reschedule", "com.travel.Booking").with_annotation(
                AnnotationFact::new("RequestMapping")
                    .with_attr("value", "/{bookingId}/slots/{slot:\\d+}")
                    .with_attr("method", vec!["RequestMethod.PUT".to_string()]),
            ),
        )
        .with_method(
            MethodFact::new("cancel", "void").with_annotation(
                AnnotationFact::new("DeleteMapping").with_attr("value", "/{bookingId}"),
            ),
        );

    let jobs = ClassFact::class("com.travel.jobs.CleanupJobs")
        .with_annotation(AnnotationFact::new("Component"))
        .with_method(
            MethodFact::new("purgeExpired", "void").with_annotation(
                AnnotationFact::new("Scheduled").with_attr("cron", "0 0 3 * * *"),
            ),
        )
        .with_method(
            MethodFact::new("pollPayments", "void").with_annotation(
                AnnotationFact::new("Scheduled").with_attr("fixedRate", "15000"),
            ),
        )
        .with_method(
            MethodFact::new("syncPartners", "void").with_annotation(
                AnnotationFact::new("Scheduled").with_attr("fixedDelay", 60000i64),
            ),
        );

    let mail = ClassFact::class("com.travel.mail.NotificationService")
        .with_annotation(AnnotationFact::new("Service"))
        .with_method(
            MethodFact::new("sendConfirmation", "void").with_annotation(
                AnnotationFact::new("Async").with_attr("value", "mailExecutor"),
            ),
        )
        .with_method(
            MethodFact::new("recordMetric", "void")
                .with_annotation(AnnotationFact::new("Async")),
        );

    vec![application, controller, jobs, mail]
}

fn make_booking_model() -> ProgramModel {
    ProgramModel::from_classes(booking_classes())
}

#[test]
fn full_archive_scan_reconstructs_every_entrypoint() {
    let result = EntrypointAnalyzer::new().analyze(&make_booking_model());

    assert!(result.successful);
    assert_eq!(result.error_message, None);
    assert_eq!(result.endpoints.len(), 5);
    assert_eq!(result.scheduled_tasks.len(), 3);
    assert_eq!(result.async_methods.len(), 2);
    assert_eq!(result.skipped_class_count, 0);
    assert_eq!(
        result.main_class.as_deref(),
        Some("com.travel.BookingApplication")
    );
}

#[test]
fn endpoints_come_out_in_class_and_declaration_order() {
    let result = EntrypointAnalyzer::new().analyze(&make_booking_model());

    let got: Vec<(HttpMethod, &str, &str)> = result
        .endpoints
        .iter()
        .map(|e| (e.http_method, e.path.as_str(), e.handler_method.as_str()))
        .collect();
    assert_eq!(
        got,
        vec![
            (HttpMethod::Get, "/api/bookings", "list"),
            (HttpMethod::Get, "/api/bookings/{bookingId}", "find"),
            (HttpMethod::Post, "/api/bookings", "create"),
            (
                HttpMethod::Put,
                "/api/bookings/{bookingId}/slots/{slot:\\d+}",
                "reschedule"
            ),
            (HttpMethod::Delete, "/api/bookings/{bookingId}", "cancel"),
        ]
    );
}

#[test]
fn regex_path_variables_keep_their_bare_names() {
    let result = EntrypointAnalyzer::new().analyze(&make_booking_model());

    let reschedule = result
        .endpoints
        .iter()
        .find(|e| e.handler_method == "reschedule")
        .unwrap();
    assert_eq!(
        reschedule.path_variables,
        vec!["bookingId".to_string(), "slot".to_string()]
    );
}

#[test]
fn payload_content_types_ride_on_the_endpoint() {
    let result = EntrypointAnalyzer::new().analyze(&make_booking_model());

    let create = result
        .endpoints
        .iter()
        .find(|e| e.handler_method == "create")
        .unwrap();
    assert_eq!(create.consumes, vec!["application/json".to_string()]);
    assert_eq!(create.produces, vec!["application/json".to_string()]);

    let list = result
        .endpoints
        .iter()
        .find(|e| e.handler_method == "list")
        .unwrap();
    assert!(list.consumes.is_empty());
    assert!(list.produces.is_empty());
}

#[test]
fn result_helpers_filter_by_handler_and_verb() {
    let result = EntrypointAnalyzer::new().analyze(&make_booking_model());

    assert_eq!(result.endpoints_of("com.travel.web.BookingController").len(), 5);
    assert!(result.endpoints_of("com.travel.BookingApplication").is_empty());

    assert_eq!(result.endpoints_matching(HttpMethod::Get).len(), 2);
    assert_eq!(result.endpoints_matching(HttpMethod::Delete).len(), 1);
    assert!(result.endpoints_matching(HttpMethod::Any).is_empty());
}

#[test]
fn scheduled_triggers_cover_cron_and_both_rate_forms() {
    let result = EntrypointAnalyzer::new().analyze(&make_booking_model());

    let tasks = &result.scheduled_tasks;
    assert_eq!(tasks[0].method_name, "purgeExpired");
    assert_eq!(tasks[0].cron.as_deref(), Some("0 0 3 * * *"));
    assert_eq!(tasks[0].fixed_rate_ms, None);

    assert_eq!(tasks[1].method_name, "pollPayments");
    assert_eq!(tasks[1].fixed_rate_ms, Some(15000));

    assert_eq!(tasks[2].method_name, "syncPartners");
    assert_eq!(tasks[2].fixed_delay_ms, Some(60000));
    assert_eq!(tasks[2].cron, None);
}

#[test]
fn async_executor_defaults_to_the_shared_pool() {
    let result = EntrypointAnalyzer::new().analyze(&make_booking_model());

    let methods = &result.async_methods;
    assert_eq!(methods[0].class_name, "com.travel.mail.NotificationService");
    assert_eq!(methods[0].method_name, "sendConfirmation");
    assert_eq!(methods[0].executor_qualifier.as_deref(), Some("mailExecutor"));
    assert_eq!(methods[1].method_name, "recordMetric");
    assert_eq!(methods[1].executor_qualifier, None);
}

#[test]
fn manifest_start_class_beats_the_launcher_main_class() {
    let model = ProgramModel::builder()
        .add_classes(booking_classes())
        .manifest_attr("Main-Class", "org.springframework.boot.loader.JarLauncher")
        .manifest_attr("Start-Class", "com.travel.BookingApplication")
        .build()
        .unwrap();
    let result = EntrypointAnalyzer::new().analyze(&model);

    assert_eq!(
        result.main_class.as_deref(),
        Some("com.travel.BookingApplication")
    );
}

#[test]
fn blank_class_facts_are_skipped_not_fatal() {
    let mut classes = booking_classes();
    classes.push(ClassFact::class("   "));
    let result = EntrypointAnalyzer::new().analyze(&ProgramModel::from_classes(classes));

    assert!(result.successful);
    assert_eq!(result.skipped_class_count, 1);
    assert_eq!(result.endpoints.len(), 5);
}

#[test]
fn reconstruction_is_deterministic() {
    let model = make_booking_model();
    let analyzer = EntrypointAnalyzer::new();
    let first = analyzer.analyze(&model);
    let second = analyzer.analyze(&model);

    assert_eq!(first.endpoints, second.endpoints);
    assert_eq!(first.scheduled_tasks, second.scheduled_tasks);
    assert_eq!(first.async_methods, second.async_methods);
    assert_eq!(first.main_class, second.main_class);
}
