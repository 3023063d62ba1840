//! Semantic reducer rules: first-wins, accumulation, flags, OR.

mod common;

use std::path::Path;

use common::parse_clean;
use qmldir_rs::{parse, parse_document, reduce};

// -----------------------------------------------------------
// Singular fields: first occurrence wins, silently.
// -----------------------------------------------------------

#[test]
fn module_identifier_first_wins() {
    let ast = parse_clean("module Foo\nmodule Bar\n");
    let document = reduce(&ast);
    assert_eq!(document.module_identifier.as_deref(), Some("Foo"));
    // Reduction is lossy; the AST is not.
    assert_eq!(ast.commands.len(), 2);
}

#[test]
fn plugin_first_wins() {
    let document = parse_document("plugin first\nplugin second lib/\n");
    let plugin = document.plugin.expect("plugin set");
    assert_eq!(plugin.name, "first");
    assert_eq!(plugin.relative_path, None);
}

#[test]
fn plugin_relative_path_preserved() {
    let document = parse_document("plugin myplugin ../lib/plugins\n");
    let plugin = document.plugin.expect("plugin set");
    assert_eq!(
        plugin.relative_path.as_deref(),
        Some(Path::new("../lib/plugins"))
    );
}

#[test]
fn classname_and_typeinfo_first_win() {
    let document = parse_document(
        "classname FirstPlugin\nclassname SecondPlugin\n\
         typeinfo first.qmltypes\ntypeinfo second.qmltypes\n",
    );
    assert_eq!(document.classname.as_deref(), Some("FirstPlugin"));
    assert_eq!(document.types_file_name.as_deref(), Some("first.qmltypes"));
}

// -----------------------------------------------------------
// Plural fields: accumulate in source order, no de-duplication.
// -----------------------------------------------------------

#[test]
fn depends_accumulate_including_duplicates() {
    let document = parse_document("depends A 1.0\ndepends B 2.0\ndepends A 1.0\n");
    assert_eq!(document.depends.len(), 3);
    assert_eq!(document.depends[0].name, "A");
    assert_eq!(document.depends[1].name, "B");
    assert_eq!(document.depends[2].name, "A");
    assert_eq!(document.depends[2].initial_version, "1.0");
}

#[test]
fn resources_accumulate_in_source_order() {
    let document = parse_document(
        "ZType 1.0 ZType.qml\nAType 1.0 AType.qml\ninternal Helper Helper.qml\n",
    );
    let names: Vec<_> = document.resources.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["ZType", "AType", "Helper"]);
}

// -----------------------------------------------------------
// Resource kind flags.
// -----------------------------------------------------------

#[test]
fn internal_resource_flags() {
    let document = parse_document("internal MyType file.qml\n");
    assert_eq!(document.resources.len(), 1);
    let resource = &document.resources[0];
    assert!(resource.internal);
    assert!(!resource.singleton);
    assert_eq!(resource.initial_version, None);
    assert_eq!(resource.file_name, "file.qml");
}

#[test]
fn singleton_resource_flags() {
    let document = parse_document("singleton MyType 1.0 file.qml\n");
    let resource = &document.resources[0];
    assert!(!resource.internal);
    assert!(resource.singleton);
    assert_eq!(resource.initial_version.as_deref(), Some("1.0"));
}

#[test]
fn plain_resource_flags() {
    let document = parse_document("MyType 1.0 file.qml\n");
    let resource = &document.resources[0];
    assert!(!resource.internal);
    assert!(!resource.singleton);
    assert_eq!(resource.initial_version.as_deref(), Some("1.0"));
    assert_eq!(resource.name, "MyType");
}

// -----------------------------------------------------------
// designersupported: logical OR, never a count.
// -----------------------------------------------------------

#[test]
fn designer_supported_absent_is_false() {
    let document = parse_document("module Foo\n");
    assert!(!document.designer_supported);
}

#[test]
fn designer_supported_once_is_true() {
    let document = parse_document("designersupported\n");
    assert!(document.designer_supported);
}

#[test]
fn designer_supported_twice_is_still_true() {
    let document = parse_document("designersupported\nmodule Foo\ndesignersupported\n");
    assert!(document.designer_supported);
}

// -----------------------------------------------------------
// Skipped commands and lifecycle.
// -----------------------------------------------------------

#[test]
fn comments_and_errors_do_not_affect_the_record() {
    let document = parse_document("# module NotReal\nplugin\nmodule Foo\n");
    assert_eq!(document.module_identifier.as_deref(), Some("Foo"));
    assert_eq!(document.plugin, None);
}

#[test]
fn best_effort_record_from_partially_broken_input() {
    let ast = parse("module Foo\ndepends Broken\ndepends Ok 1.0\n");
    assert!(ast.has_errors());
    let document = reduce(&ast);
    assert_eq!(document.module_identifier.as_deref(), Some("Foo"));
    assert_eq!(document.depends.len(), 1);
    assert_eq!(document.depends[0].name, "Ok");
}

#[test]
fn empty_input_reduces_to_defaults() {
    let document = parse_document("");
    assert_eq!(document, qmldir_rs::Document::default());
}
