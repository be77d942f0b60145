//! Parser tests - module and submodule roots, header/linkage/meta/revision
//! statements, and the phase ordering between them.

use yantra::parser::ErrorKind;
use yantra::parser::ast::{DataNode, YangVersion};
use yantra::{Interner, YinParser, parse_module, parse_submodule};

const YIN: &str = "urn:ietf:params:xml:ns:yang:yin:1";

fn module_doc(body: &str) -> String {
    format!(
        concat!(
            "<module xmlns=\"{ns}\" name=\"m\">\n",
            "  <yang-version value=\"1.1\"/>\n",
            "  <namespace uri=\"urn:example:m\"/>\n",
            "  <prefix value=\"m\"/>\n",
            "{body}",
            "</module>\n",
        ),
        ns = YIN,
        body = body
    )
}

fn parse_ok(doc: &str) -> (yantra::parser::ast::Module, yantra::ParserContext) {
    parse_module(doc.as_bytes()).expect("module should parse")
}

fn parse_err(doc: &str) -> yantra::ParseError {
    parse_module(doc.as_bytes()).expect_err("module should not parse")
}

#[test]
fn test_minimum_module() {
    let (module, ctx) = parse_ok(&module_doc(""));
    assert_eq!(&*module.name, "m");
    assert_eq!(module.version, YangVersion::V1_1);
    assert_eq!(module.namespace.as_deref(), Some("urn:example:m"));
    assert_eq!(module.prefix.as_deref(), Some("m"));
    assert!(module.data.is_empty());
    assert_eq!(ctx.version, YangVersion::V1_1);
}

#[test]
fn test_version_1_0_module() {
    let doc = format!(
        "<module xmlns=\"{YIN}\" name=\"m\">\
           <yang-version value=\"1.0\"/>\
           <namespace uri=\"urn:example:m\"/>\
           <prefix value=\"m\"/>\
         </module>"
    );
    let (module, ctx) = parse_ok(&doc);
    assert_eq!(module.version, YangVersion::V1_0);
    assert_eq!(ctx.version, YangVersion::V1_0);
}

#[test]
fn test_invalid_yang_version_value() {
    let doc = format!(
        "<module xmlns=\"{YIN}\" name=\"m\">\
           <yang-version value=\"2.0\"/>\
           <namespace uri=\"urn:example:m\"/>\
           <prefix value=\"m\"/>\
         </module>"
    );
    let err = parse_err(&doc);
    assert!(matches!(err.kind, ErrorKind::InvalidEnum { ref value, .. } if value == "2.0"));
}

#[test]
fn test_missing_prefix_is_missing_child() {
    let doc = format!(
        "<module xmlns=\"{YIN}\" name=\"m\">\
           <yang-version value=\"1.1\"/>\
           <namespace uri=\"urn:example:m\"/>\
         </module>"
    );
    let err = parse_err(&doc);
    assert_eq!(
        err.kind,
        ErrorKind::MissingChild { child: "prefix", parent: "module" }
    );
}

#[test]
fn test_duplicate_description_is_duplicate_child() {
    let body = "  <description><text>one</text></description>\n\
                \x20 <description><text>two</text></description>\n";
    let err = parse_err(&module_doc(body));
    assert_eq!(
        err.kind,
        ErrorKind::DuplicateChild { child: "description", parent: "module" }
    );
}

#[test]
fn test_meta_elements_carry_text_bodies() {
    let body = "  <organization><text>Example Org</text></organization>\n\
                \x20 <contact><text>admin@example.com</text></contact>\n\
                \x20 <description><text>  spaced  text  </text></description>\n\
                \x20 <reference><text>RFC 7950</text></reference>\n";
    let (module, _) = parse_ok(&module_doc(body));
    assert_eq!(module.organization.as_deref(), Some("Example Org"));
    assert_eq!(module.contact.as_deref(), Some("admin@example.com"));
    // whitespace in text bodies is preserved verbatim
    assert_eq!(module.description.as_deref(), Some("  spaced  text  "));
    assert_eq!(module.reference.as_deref(), Some("RFC 7950"));
}

#[test]
fn test_import_after_revision_is_ordering_violation() {
    let body = "  <revision date=\"2024-01-15\"/>\n\
                \x20 <import module=\"other\"><prefix value=\"o\"/></import>\n";
    let err = parse_err(&module_doc(body));
    assert_eq!(
        err.kind,
        ErrorKind::OrderingViolation { child: "import", after: "revision", parent: "module" }
    );
}

#[test]
fn test_namespace_after_import_is_ordering_violation() {
    let doc = format!(
        "<module xmlns=\"{YIN}\" name=\"m\">\
           <yang-version value=\"1.1\"/>\
           <prefix value=\"m\"/>\
           <import module=\"other\"><prefix value=\"o\"/></import>\
           <namespace uri=\"urn:example:m\"/>\
         </module>"
    );
    let err = parse_err(&doc);
    assert_eq!(
        err.kind,
        ErrorKind::OrderingViolation { child: "namespace", after: "import", parent: "module" }
    );
}

#[test]
fn test_revisions_keep_source_order() {
    let body = "  <revision date=\"2024-06-30\">\n\
                \x20   <description><text>second</text></description>\n\
                \x20 </revision>\n\
                \x20 <revision date=\"2023-01-01\"/>\n";
    let (module, _) = parse_ok(&module_doc(body));
    assert_eq!(module.revisions.len(), 2);
    assert_eq!(&*module.revisions[0].date, "2024-06-30");
    assert_eq!(module.revisions[0].description.as_deref(), Some("second"));
    assert_eq!(&*module.revisions[1].date, "2023-01-01");
}

#[test]
fn test_invalid_revision_date() {
    let err = parse_err(&module_doc("  <revision date=\"2024-13-01\"/>\n"));
    assert!(matches!(
        err.kind,
        ErrorKind::InvalidDate { ref value, stmt: "revision" } if value == "2024-13-01"
    ));
}

#[test]
fn test_import_with_revision_date() {
    let body = "  <import module=\"ietf-inet-types\">\n\
                \x20   <prefix value=\"inet\"/>\n\
                \x20   <revision-date date=\"2013-07-15\"/>\n\
                \x20 </import>\n";
    let (module, _) = parse_ok(&module_doc(body));
    assert_eq!(module.imports.len(), 1);
    let imp = &module.imports[0];
    assert_eq!(&*imp.name, "ietf-inet-types");
    assert_eq!(imp.prefix.as_deref(), Some("inet"));
    assert_eq!(imp.revision.as_deref(), Some("2013-07-15"));
}

#[test]
fn test_import_without_prefix_is_missing_child() {
    let err = parse_err(&module_doc("  <import module=\"other\"/>\n"));
    assert_eq!(
        err.kind,
        ErrorKind::MissingChild { child: "prefix", parent: "import" }
    );
}

#[test]
fn test_import_prefix_clashing_with_module_prefix() {
    let body = "  <import module=\"other\"><prefix value=\"m\"/></import>\n";
    let err = parse_err(&module_doc(body));
    assert!(matches!(
        err.kind,
        ErrorKind::NameCollision { what: "prefix", ref name } if name == "m"
    ));
}

#[test]
fn test_import_prefix_clashing_with_other_import() {
    let body = "  <import module=\"a\"><prefix value=\"x\"/></import>\n\
                \x20 <import module=\"b\"><prefix value=\"x\"/></import>\n";
    let err = parse_err(&module_doc(body));
    assert!(matches!(
        err.kind,
        ErrorKind::NameCollision { what: "prefix", ref name } if name == "x"
    ));
}

#[test]
fn test_include_clashing_with_module_name() {
    let err = parse_err(&module_doc("  <include module=\"m\"/>\n"));
    assert!(matches!(
        err.kind,
        ErrorKind::NameCollision { what: "module", ref name } if name == "m"
    ));
}

#[test]
fn test_include_clashing_with_known_module() {
    let doc = module_doc("  <include module=\"loaded-elsewhere\"/>\n");
    let mut dict = Interner::new();
    let mut parser = YinParser::new(&mut dict);
    parser.know_module("loaded-elsewhere");
    let err = parser
        .parse_module(doc.as_bytes())
        .expect_err("include must collide");
    assert!(matches!(
        err.kind,
        ErrorKind::NameCollision { what: "module", ref name } if name == "loaded-elsewhere"
    ));
}

#[test]
fn test_include_accepted_for_fresh_submodule_name() {
    let body = "  <include module=\"m-types\"><revision-date date=\"2024-01-01\"/></include>\n";
    let (module, _) = parse_ok(&module_doc(body));
    assert_eq!(module.includes.len(), 1);
    assert_eq!(&*module.includes[0].name, "m-types");
    assert_eq!(module.includes[0].revision.as_deref(), Some("2024-01-01"));
}

#[test]
fn test_include_description_requires_version_11() {
    let doc = format!(
        "<module xmlns=\"{YIN}\" name=\"m\">\
           <yang-version value=\"1.0\"/>\
           <namespace uri=\"urn:example:m\"/>\
           <prefix value=\"m\"/>\
           <include module=\"sub\">\
             <description><text>d</text></description>\
           </include>\
         </module>"
    );
    let err = parse_err(&doc);
    assert_eq!(
        err.kind,
        ErrorKind::VersionTooLow { child: "description", parent: "include" }
    );
}

#[test]
fn test_feature_and_identity_definitions() {
    let body = "  <feature name=\"virtual\">\n\
                \x20   <if-feature name=\"hardware\"/>\n\
                \x20   <status value=\"current\"/>\n\
                \x20 </feature>\n\
                \x20 <identity name=\"algo\">\n\
                \x20   <base name=\"crypto:base-algo\"/>\n\
                \x20 </identity>\n";
    let (module, _) = parse_ok(&module_doc(body));
    assert_eq!(module.features.len(), 1);
    assert_eq!(&*module.features[0].name, "virtual");
    assert_eq!(module.features[0].iffeatures.len(), 1);
    assert_eq!(module.identities.len(), 1);
    assert_eq!(module.identities[0].bases.len(), 1);
    assert_eq!(&*module.identities[0].bases[0], "crypto:base-algo");
}

#[test]
fn test_data_nodes_preserve_source_order() {
    let body = "  <leaf name=\"a\"><type name=\"string\"/></leaf>\n\
                \x20 <container name=\"b\"/>\n\
                \x20 <leaf name=\"c\"><type name=\"string\"/></leaf>\n";
    let (module, _) = parse_ok(&module_doc(body));
    let names: Vec<&str> = module.data.iter().map(|n| n.name()).collect();
    assert_eq!(names, ["a", "b", "c"]);
    assert!(matches!(module.data[1], DataNode::Container(_)));
}

// ----------------------------------------------------------------------------
// submodules
// ----------------------------------------------------------------------------

fn submodule_doc(body: &str) -> String {
    format!(
        concat!(
            "<submodule xmlns=\"{ns}\" name=\"m-types\">\n",
            "  <yang-version value=\"1.1\"/>\n",
            "  <belongs-to module=\"m\"><prefix value=\"m\"/></belongs-to>\n",
            "{body}",
            "</submodule>\n",
        ),
        ns = YIN,
        body = body
    )
}

#[test]
fn test_minimal_submodule() {
    let main = yantra::ParserContext::default();
    let (submod, ctx) = parse_submodule(submodule_doc("").as_bytes(), &main)
        .expect("submodule should parse");
    assert_eq!(&*submod.name, "m-types");
    assert_eq!(submod.belongs_to.as_deref(), Some("m"));
    assert_eq!(submod.prefix.as_deref(), Some("m"));
    assert_eq!(ctx.version, YangVersion::V1_1);
}

#[test]
fn test_submodule_without_belongs_to() {
    let doc = format!(
        "<submodule xmlns=\"{YIN}\" name=\"s\">\
           <yang-version value=\"1.1\"/>\
         </submodule>"
    );
    let main = yantra::ParserContext::default();
    let err = parse_submodule(doc.as_bytes(), &main).expect_err("belongs-to is mandatory");
    assert_eq!(
        err.kind,
        ErrorKind::MissingChild { child: "belongs-to", parent: "submodule" }
    );
}

#[test]
fn test_submodule_inherits_scope_sets() {
    let body = "  <container name=\"c\">\n\
                \x20   <typedef name=\"t\"><type name=\"string\"/></typedef>\n\
                \x20 </container>\n";
    let (_, main_ctx) = parse_ok(&module_doc(body));
    assert_eq!(main_ctx.typedef_nodes.len(), 1);

    let (_, sub_ctx) = parse_submodule(submodule_doc("").as_bytes(), &main_ctx)
        .expect("submodule should parse");
    assert_eq!(sub_ctx.typedef_nodes.len(), 1);
    // fresh ids in the submodule continue past the inherited watermark
    assert!(sub_ctx.nodes_issued >= main_ctx.nodes_issued);
}

#[test]
fn test_module_entry_rejects_submodule_root() {
    let err = parse_err(&submodule_doc(""));
    assert!(matches!(
        err.kind,
        ErrorKind::ModuleSubmoduleExpected { ref found, expected: "module" } if found == "submodule"
    ));
}

#[test]
fn test_submodule_entry_rejects_module_root() {
    let main = yantra::ParserContext::default();
    let err = parse_submodule(module_doc("").as_bytes(), &main)
        .expect_err("module root must be rejected");
    assert!(matches!(
        err.kind,
        ErrorKind::ModuleSubmoduleExpected { ref found, expected: "submodule" } if found == "module"
    ));
}
