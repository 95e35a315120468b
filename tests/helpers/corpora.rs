//! Fixture corpora: small C++ sources with hand-resolved event streams,
//! mirroring what a compiler front-end reports for them.

use xref::corpus::Corpus;
use xref::unit::{
    DeclRef, Instantiation, InstantiationKind, OccurrenceEvent, Role, ScopePath, SourceUnit,
};

use super::text::span_of;

// ============================================================================
// MULTIPLE DEFINITIONS: same-named members in sibling structs, plus a
// dependent call resolving differently per instantiation
// ============================================================================

pub const MULTIPLE_DEFINITIONS_PATH: &str = "multiple_definitions.cc";

pub const MULTIPLE_DEFINITIONS_TEXT: &str = "\
struct c1 {
  void bar() {}
};

struct c2 {
  void bar() {}
};

struct c3 {
  void bar() {}
};

template <typename T> void foo() {
  T().bar();
}

void function() {
  foo<c1>();
  foo<c2>();
}
";

pub fn multiple_definitions() -> Corpus {
    let t = MULTIPLE_DEFINITIONS_TEXT;
    let mut unit = SourceUnit::new(MULTIPLE_DEFINITIONS_PATH, t);

    let c1 = DeclRef::new(ScopePath::new(["c1"]));
    let c2 = DeclRef::new(ScopePath::new(["c2"]));
    let c3 = DeclRef::new(ScopePath::new(["c3"]));
    let c1_bar = DeclRef::new(ScopePath::new(["c1", "bar"])).with_signature("()");
    let c2_bar = DeclRef::new(ScopePath::new(["c2", "bar"])).with_signature("()");
    let c3_bar = DeclRef::new(ScopePath::new(["c3", "bar"])).with_signature("()");

    unit.add(OccurrenceEvent::new(
        span_of(t, "c1", 0),
        Role::Definition,
        c1.clone(),
    ));
    unit.add(OccurrenceEvent::new(
        span_of(t, "bar", 0),
        Role::Definition,
        c1_bar.clone(),
    ));
    unit.add(OccurrenceEvent::new(
        span_of(t, "c2", 0),
        Role::Definition,
        c2.clone(),
    ));
    unit.add(OccurrenceEvent::new(
        span_of(t, "bar", 1),
        Role::Definition,
        c2_bar.clone(),
    ));
    unit.add(OccurrenceEvent::new(
        span_of(t, "c3", 0),
        Role::Definition,
        c3,
    ));
    unit.add(OccurrenceEvent::new(
        span_of(t, "bar", 2),
        Role::Definition,
        c3_bar,
    ));

    // The function template and the dependent call in its body.
    let foo_template = ScopePath::new(["foo"]);
    let foo_primary = DeclRef::new(ScopePath::new(["foo"]))
        .with_signature("()")
        .dependent();
    let t_bar = DeclRef::new(ScopePath::new(["T", "bar"]))
        .with_signature("()")
        .dependent();
    unit.add(
        OccurrenceEvent::new(span_of(t, "foo", 0), Role::Definition, foo_primary)
            .in_template(foo_template.clone()),
    );
    unit.add(
        OccurrenceEvent::new(span_of(t, "bar", 3), Role::Reference, t_bar)
            .in_template(foo_template.clone()),
    );
    // Template parameter uses stay unresolved.
    unit.add(OccurrenceEvent::unresolved(span_of(t, "T", 1), Role::Reference));

    unit.add(OccurrenceEvent::new(
        span_of(t, "function", 0),
        Role::Definition,
        DeclRef::new(ScopePath::new(["function"])).with_signature("()"),
    ));

    // Calls instantiate foo for c1 and c2; c3 stays unreferenced.
    let foo_c1 = DeclRef::new(ScopePath::new(["foo"]))
        .with_signature("()")
        .instantiated(["c1"]);
    let foo_c2 = DeclRef::new(ScopePath::new(["foo"]))
        .with_signature("()")
        .instantiated(["c2"]);
    unit.add(OccurrenceEvent::new(
        span_of(t, "foo", 1),
        Role::Reference,
        foo_c1.clone(),
    ));
    unit.add(OccurrenceEvent::new(span_of(t, "c1", 1), Role::Reference, c1));
    unit.add(OccurrenceEvent::new(
        span_of(t, "foo", 2),
        Role::Reference,
        foo_c2.clone(),
    ));
    unit.add(OccurrenceEvent::new(span_of(t, "c2", 1), Role::Reference, c2));

    unit.add_instantiation(
        Instantiation::new(foo_template.clone(), ["c1"], InstantiationKind::Implicit)
            .resolve(span_of(t, "foo", 0), foo_c1)
            .resolve(span_of(t, "bar", 3), c1_bar),
    );
    unit.add_instantiation(
        Instantiation::new(foo_template, ["c2"], InstantiationKind::Implicit)
            .resolve(span_of(t, "foo", 0), foo_c2)
            .resolve(span_of(t, "bar", 3), c2_bar),
    );

    let mut corpus = Corpus::new();
    corpus.add_unit(unit);
    corpus
}

// ============================================================================
// TEMPLATE OUTLINE: member template with an out-of-line definition, a
// self-reference in the body, and a single explicit instantiation
// ============================================================================

pub const TEMPLATE_OUTLINE_PATH: &str = "template_outline.cc";

pub const TEMPLATE_OUTLINE_TEXT: &str = "\
template <typename T> struct S {
  void f(int i);
};

template <typename T> void S<T>::f(int i) {
  this->f(42);
}

template struct S<int>;
";

pub fn template_outline() -> Corpus {
    let t = TEMPLATE_OUTLINE_TEXT;
    let mut unit = SourceUnit::new(TEMPLATE_OUTLINE_PATH, t);

    let s_template = ScopePath::new(["S"]);
    let s_primary = DeclRef::new(ScopePath::new(["S"])).dependent();
    let s_inst = DeclRef::new(ScopePath::new(["S"])).instantiated(["int"]);
    let f_primary = DeclRef::new(ScopePath::new(["S", "f"]))
        .with_signature("(int)")
        .dependent();
    let f_inst = DeclRef::new(ScopePath::new(["S", "f"]))
        .with_signature("(int)")
        .instantiated(["int"]);

    unit.add(
        OccurrenceEvent::new(span_of(t, "S", 0), Role::Definition, s_primary.clone())
            .in_template(s_template.clone()),
    );
    unit.add(
        OccurrenceEvent::new(span_of(t, "f", 0), Role::Declaration, f_primary.clone())
            .in_template(s_template.clone()),
    );
    unit.add(
        OccurrenceEvent::new(span_of(t, "S", 1), Role::Reference, s_primary)
            .in_template(s_template.clone()),
    );
    unit.add(
        OccurrenceEvent::new(span_of(t, "f", 1), Role::Definition, f_primary.clone())
            .in_template(s_template.clone()),
    );
    unit.add(
        OccurrenceEvent::new(span_of(t, "f", 2), Role::Reference, f_primary)
            .in_template(s_template.clone()),
    );
    unit.add(OccurrenceEvent::new(
        span_of(t, "S", 2),
        Role::Reference,
        s_inst.clone(),
    ));

    unit.add_instantiation(
        Instantiation::new(s_template, ["int"], InstantiationKind::Explicit)
            .resolve(span_of(t, "S", 0), s_inst.clone())
            .resolve(span_of(t, "S", 1), s_inst)
            .resolve(span_of(t, "f", 0), f_inst.clone())
            .resolve(span_of(t, "f", 1), f_inst.clone())
            .resolve(span_of(t, "f", 2), f_inst),
    );

    let mut corpus = Corpus::new();
    corpus.add_unit(unit);
    corpus
}

// ============================================================================
// SEARCH: one name declared in global, namespace, and struct scope, plus a
// longer name separating exact from prefix matching
// ============================================================================

pub const SEARCH_PATH: &str = "search.cc";

pub const SEARCH_TEXT: &str = "\
// name search across shadowed declarations in three scopes.
//
//
//
//
//
//
//
int symbol;
int symbolic;

namespace foo {

long symbol;

}

struct bar {

char symbol;

};

void f(bar *b) {
  return symbol + symbolic + foo::symbol + b->symbol;
}
";

pub fn search_corpus() -> Corpus {
    let t = SEARCH_TEXT;
    let mut unit = SourceUnit::new(SEARCH_PATH, t);

    let global_symbol = DeclRef::new(ScopePath::new(["symbol"]));
    let symbolic = DeclRef::new(ScopePath::new(["symbolic"]));
    let foo_symbol = DeclRef::new(ScopePath::new(["foo", "symbol"]));
    let bar_symbol = DeclRef::new(ScopePath::new(["bar", "symbol"]));
    let bar = DeclRef::new(ScopePath::new(["bar"]));
    let b = DeclRef::new(ScopePath::new(["f", "b"]));

    unit.add(OccurrenceEvent::new(
        span_of(t, "symbol", 0),
        Role::Definition,
        global_symbol.clone(),
    ));
    unit.add(OccurrenceEvent::new(
        span_of(t, "symbolic", 0),
        Role::Definition,
        symbolic.clone(),
    ));
    unit.add(OccurrenceEvent::new(
        span_of(t, "foo", 0),
        Role::Definition,
        DeclRef::new(ScopePath::new(["foo"])),
    ));
    unit.add(OccurrenceEvent::new(
        span_of(t, "symbol", 1),
        Role::Definition,
        foo_symbol.clone(),
    ));
    unit.add(OccurrenceEvent::new(
        span_of(t, "bar", 0),
        Role::Definition,
        bar.clone(),
    ));
    unit.add(OccurrenceEvent::new(
        span_of(t, "symbol", 2),
        Role::Definition,
        bar_symbol.clone(),
    ));
    unit.add(OccurrenceEvent::new(
        span_of(t, "f", 0),
        Role::Definition,
        DeclRef::new(ScopePath::new(["f"])).with_signature("(bar *)"),
    ));
    unit.add(OccurrenceEvent::new(span_of(t, "bar", 1), Role::Reference, bar));
    unit.add(OccurrenceEvent::new(span_of(t, "b", 0), Role::Definition, b.clone()));
    unit.add(OccurrenceEvent::new(
        span_of(t, "symbol", 3),
        Role::Reference,
        global_symbol,
    ));
    unit.add(OccurrenceEvent::new(
        span_of(t, "symbolic", 1),
        Role::Reference,
        symbolic,
    ));
    unit.add(OccurrenceEvent::new(
        span_of(t, "foo", 1),
        Role::Reference,
        DeclRef::new(ScopePath::new(["foo"])),
    ));
    unit.add(OccurrenceEvent::new(
        span_of(t, "symbol", 4),
        Role::Reference,
        foo_symbol,
    ));
    unit.add(OccurrenceEvent::new(span_of(t, "b", 1), Role::Reference, b));
    unit.add(OccurrenceEvent::new(
        span_of(t, "symbol", 5),
        Role::Reference,
        bar_symbol,
    ));

    let mut corpus = Corpus::new();
    corpus.add_unit(unit);
    corpus
}

// ============================================================================
// FOR RANGE: the loop `:` desugars to calls of both begin() and end()
// ============================================================================

pub const FOR_RANGE_PATH: &str = "for_range.cc";

pub const FOR_RANGE_TEXT: &str = "\
struct S {
  char *begin();
  char *end();
};

void f(S s) {
  for (char c : s) {
    c++;
  }
}
";

pub fn for_range() -> Corpus {
    let t = FOR_RANGE_TEXT;
    let mut unit = SourceUnit::new(FOR_RANGE_PATH, t);

    let begin = DeclRef::new(ScopePath::new(["S", "begin"])).with_signature("()");
    let end = DeclRef::new(ScopePath::new(["S", "end"])).with_signature("()");
    let s_param = DeclRef::new(ScopePath::new(["f", "s"]));
    let c_var = DeclRef::new(ScopePath::new(["f", "c"]));

    unit.add(OccurrenceEvent::new(
        span_of(t, "S", 0),
        Role::Definition,
        DeclRef::new(ScopePath::new(["S"])),
    ));
    unit.add(OccurrenceEvent::new(
        span_of(t, "begin", 0),
        Role::Declaration,
        begin.clone(),
    ));
    unit.add(OccurrenceEvent::new(
        span_of(t, "end", 0),
        Role::Declaration,
        end.clone(),
    ));
    unit.add(OccurrenceEvent::new(
        span_of(t, "f", 0),
        Role::Definition,
        DeclRef::new(ScopePath::new(["f"])).with_signature("(S)"),
    ));
    unit.add(OccurrenceEvent::new(
        span_of(t, "S", 1),
        Role::Reference,
        DeclRef::new(ScopePath::new(["S"])),
    ));
    unit.add(OccurrenceEvent::new(
        span_of(t, "s", 0),
        Role::Definition,
        s_param.clone(),
    ));
    unit.add(OccurrenceEvent::new(
        span_of(t, "c", 0),
        Role::Definition,
        c_var.clone(),
    ));
    // The range-for colon resolves to both begin and end.
    unit.add(OccurrenceEvent::new(span_of(t, ":", 0), Role::Reference, begin));
    unit.add(OccurrenceEvent::new(span_of(t, ":", 0), Role::Reference, end));
    unit.add(OccurrenceEvent::new(span_of(t, "s", 1), Role::Reference, s_param));
    unit.add(OccurrenceEvent::new(span_of(t, "c", 1), Role::Reference, c_var));

    let mut corpus = Corpus::new();
    corpus.add_unit(unit);
    corpus
}
