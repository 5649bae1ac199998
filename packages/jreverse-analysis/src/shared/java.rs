//! Java type-system helpers: JDK detection, collection handling, naming.
//!
//! These are coarse string-level heuristics over loader-recorded type
//! names. Type names arrive fully qualified where the loader could
//! resolve them, with generics preserved (`java.util.List<com.acme.X>`)
//! and arrays suffixed (`com.acme.X[]`).

use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;

/// Package prefixes treated as standard library / platform code.
const JDK_PREFIXES: &[&str] = &[
    "java.",
    "javax.",
    "jakarta.",
    "jdk.",
    "sun.",
    "com.sun.",
    "kotlin.",
    "scala.",
];

static PRIMITIVES: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        "void", "boolean", "byte", "short", "int", "long", "char", "float", "double",
    ]
    .into_iter()
    .collect()
});

/// Common `java.lang`/`java.util` types a loader may record unqualified.
static SIMPLE_JDK_TYPES: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        "Object",
        "String",
        "CharSequence",
        "StringBuilder",
        "Integer",
        "Long",
        "Short",
        "Byte",
        "Boolean",
        "Character",
        "Float",
        "Double",
        "Number",
        "Void",
        "Class",
        "Exception",
        "RuntimeException",
        "Throwable",
        "Error",
        "Iterable",
        "Comparable",
        "Optional",
        "BigDecimal",
        "BigInteger",
        "Date",
        "LocalDate",
        "LocalDateTime",
        "Instant",
        "Duration",
        "UUID",
    ]
    .into_iter()
    .collect()
});

/// Multi-valued container types; a field of one of these holds its
/// element type at arm's length (aggregation, not composition).
static COLLECTION_TYPES: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        "Collection",
        "List",
        "ArrayList",
        "LinkedList",
        "Set",
        "HashSet",
        "LinkedHashSet",
        "TreeSet",
        "SortedSet",
        "NavigableSet",
        "Map",
        "HashMap",
        "LinkedHashMap",
        "TreeMap",
        "SortedMap",
        "NavigableMap",
        "ConcurrentHashMap",
        "ConcurrentMap",
        "Queue",
        "Deque",
        "ArrayDeque",
        "PriorityQueue",
        "Vector",
        "Stack",
        "Iterator",
        "Stream",
    ]
    .into_iter()
    .collect()
});

pub fn is_primitive(type_name: &str) -> bool {
    PRIMITIVES.contains(type_name)
}

/// `java.lang.Object`, qualified or bare.
pub fn is_java_lang_object(name: &str) -> bool {
    name == "java.lang.Object" || name == "Object"
}

/// Standard-library or platform type (never an application class).
pub fn is_jdk_type(type_name: &str) -> bool {
    let base = strip_generics(type_name).trim_end_matches("[]");
    if is_primitive(base) {
        return true;
    }
    if JDK_PREFIXES.iter().any(|p| base.starts_with(p)) {
        return true;
    }
    !base.contains('.') && SIMPLE_JDK_TYPES.contains(base)
}

/// Is this an application type worth an analysis edge? Filters
/// primitives and the standard library in one step.
pub fn is_analyzable_type(type_name: &str) -> bool {
    let base = strip_generics(type_name).trim_end_matches("[]");
    !base.is_empty() && !is_jdk_type(base)
}

/// Drop a trailing generic parameter list: `List<Foo>` -> `List`.
pub fn strip_generics(type_name: &str) -> &str {
    match type_name.find('<') {
        Some(idx) => &type_name[..idx],
        None => type_name,
    }
}

pub fn is_array_type(type_name: &str) -> bool {
    type_name.ends_with("[]")
}

/// Collection or array type (multi-valued field).
pub fn is_collection_type(type_name: &str) -> bool {
    if is_array_type(type_name) {
        return true;
    }
    let base = strip_generics(type_name);
    COLLECTION_TYPES.contains(simple_name(base))
}

/// Element type carried by a collection/array field.
///
/// Takes the last top-level generic argument so `Map<String, Order>`
/// yields `Order` (the value side), and `Order[]` yields `Order`.
pub fn collection_element_type(type_name: &str) -> Option<String> {
    if let Some(base) = type_name.strip_suffix("[]") {
        return Some(base.to_string());
    }
    let open = type_name.find('<')?;
    let close = type_name.rfind('>')?;
    if close <= open {
        return None;
    }
    let args = &type_name[open + 1..close];
    let mut depth = 0usize;
    let mut last_start = 0usize;
    for (i, c) in args.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => last_start = i + 1,
            _ => {}
        }
    }
    let last = args[last_start..].trim();
    // Wildcards and type variables carry no class identity
    let last = last
        .trim_start_matches("? extends ")
        .trim_start_matches("? super ")
        .trim();
    if last.is_empty() || last == "?" || !last.contains(|c: char| c.is_lowercase() || c == '.') {
        return None;
    }
    Some(last.to_string())
}

/// Simple (unqualified) name: text after the last `.`, generics and
/// array suffix stripped.
pub fn simple_name(type_name: &str) -> &str {
    let base = strip_generics(type_name).trim_end_matches("[]");
    match base.rfind('.') {
        Some(idx) => &base[idx + 1..],
        None => base,
    }
}

/// Package of a fully-qualified name; empty for the default package.
pub fn package_of(fqn: &str) -> &str {
    match strip_generics(fqn).rfind('.') {
        Some(idx) => &fqn[..idx],
        None => "",
    }
}

/// Lower-camel-case a simple name (`OrderService` -> `orderService`),
/// the default bean-naming convention.
pub fn lower_camel_case(name: &str) -> String {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = String::new();
    out.extend(first.to_lowercase());
    out.push_str(chars.as_str());
    out
}
