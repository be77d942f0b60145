//! Parser tests - error surface: attribute binding, roots and trailing
//! content, inline text carriers, lines, and failure classes.

use yantra::parse_module;
use yantra::parser::{ErrorKind, FailureClass};

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

fn parse_err(doc: &str) -> yantra::ParseError {
    parse_module(doc.as_bytes()).expect_err("parse should fail")
}

#[test]
fn test_missing_argument_attribute() {
    let err = parse_err(&format!(
        "<module xmlns=\"{YIN}\" name=\"m\">\
           <yang-version value=\"1.1\"/>\
           <namespace uri=\"urn:example:m\"/>\
           <prefix/>\
         </module>"
    ));
    assert_eq!(
        err.kind,
        ErrorKind::MissingAttribute { attr: "value", stmt: "prefix" }
    );
}

#[test]
fn test_unexpected_argument_attribute() {
    let err = parse_err(&module_doc("  <container name=\"c\" bogus=\"1\"/>\n"));
    assert!(matches!(
        err.kind,
        ErrorKind::UnexpectedAttribute { ref attr, stmt: "container" } if attr == "bogus"
    ));
}

#[test]
fn test_known_but_wrong_argument_attribute() {
    // `value` belongs to the argument alphabet but container takes `name`
    let err = parse_err(&module_doc("  <container value=\"c\"/>\n"));
    assert!(matches!(
        err.kind,
        ErrorKind::UnexpectedAttribute { ref attr, stmt: "container" } if attr == "value"
    ));
}

#[test]
fn test_duplicate_argument_attribute() {
    let err = parse_err(&module_doc("  <container name=\"a\" name=\"b\"/>\n"));
    assert_eq!(
        err.kind,
        ErrorKind::DuplicateAttribute { attr: "name", stmt: "container" }
    );
}

#[test]
fn test_invalid_identifier_argument() {
    let err = parse_err(&module_doc("  <container name=\"9lives\"/>\n"));
    assert!(matches!(
        err.kind,
        ErrorKind::InvalidCharacter { ch: '9', what: "identifier" }
    ));
}

#[test]
fn test_module_root_in_wrong_namespace() {
    let err = parse_err("<module xmlns=\"urn:not:yin\" name=\"m\"/>");
    assert!(matches!(
        err.kind,
        ErrorKind::ModuleSubmoduleExpected { ref found, expected: "module" } if found == "module"
    ));
}

#[test]
fn test_non_module_root() {
    let err = parse_err(&format!("<container xmlns=\"{YIN}\" name=\"c\"/>"));
    assert!(matches!(
        err.kind,
        ErrorKind::ModuleSubmoduleExpected { ref found, .. } if found == "container"
    ));
}

#[test]
fn test_empty_input() {
    let err = parse_err("");
    assert!(matches!(
        err.kind,
        ErrorKind::ModuleSubmoduleExpected { ref found, .. } if found == "end of input"
    ));
}

#[test]
fn test_trailing_element_after_root() {
    let doc = format!(
        "<module xmlns=\"{YIN}\" name=\"m\">\
           <yang-version value=\"1.1\"/>\
           <namespace uri=\"urn:example:m\"/>\
           <prefix value=\"m\"/>\
         </module><stray/>"
    );
    let err = parse_err(&doc);
    assert!(matches!(
        err.kind,
        ErrorKind::TrailingGarbage { ref snippet } if snippet == "stray"
    ));
}

#[test]
fn test_trailing_comment_is_fine() {
    let doc = format!(
        "<module xmlns=\"{YIN}\" name=\"m\">\
           <yang-version value=\"1.1\"/>\
           <namespace uri=\"urn:example:m\"/>\
           <prefix value=\"m\"/>\
         </module>\n<!-- generated -->\n"
    );
    assert!(parse_module(doc.as_bytes()).is_ok());
}

#[test]
fn test_invalid_utf8_input() {
    let mut bytes = module_doc("").into_bytes();
    bytes.push(0xFF);
    let err = parse_module(&bytes).expect_err("invalid UTF-8 must fail");
    assert!(matches!(err.kind, ErrorKind::InvalidCharacter { .. }));
}

#[test]
fn test_malformed_xml_is_reported() {
    let err = parse_err("<module xmlns=\"urn:ietf:params:xml:ns:yang:yin:1\" name=\"m\">");
    assert!(matches!(err.kind, ErrorKind::Xml(_)));
}

#[test]
fn test_error_lines_point_at_the_offender() {
    // the stray element sits on line 5
    let doc = format!(
        "<module xmlns=\"{YIN}\" name=\"m\">\n\
         <yang-version value=\"1.1\"/>\n\
         <namespace uri=\"urn:example:m\"/>\n\
         <prefix value=\"m\"/>\n\
         <frobnicate/>\n\
         </module>"
    );
    let err = parse_err(&doc);
    assert!(matches!(err.kind, ErrorKind::UnexpectedChild { .. }));
    assert_eq!(err.line, 5);
}

#[test]
fn test_error_display_names_statements_and_line() {
    let err = parse_err(&module_doc(
        "  <description><text>a</text></description>\n\
         \x20 <description><text>b</text></description>\n",
    ));
    let rendered = err.to_string();
    assert!(rendered.contains("description"));
    assert!(rendered.contains("module"));
    assert!(rendered.starts_with(&format!("line {}:", err.line)));
}

#[test]
fn test_failure_classes() {
    let err = parse_err(&module_doc("  <frobnicate/>\n"));
    assert_eq!(err.class(), FailureClass::InvalidInput);
}

#[test]
fn test_description_without_text_child_is_missing_child() {
    let err = parse_err(&module_doc("  <description/>\n"));
    assert_eq!(
        err.kind,
        ErrorKind::MissingChild { child: "text", parent: "description" }
    );
}

#[test]
fn test_description_with_raw_text_body_is_missing_child() {
    // text content directly in <description> is discarded; the argument must
    // travel in a <text> child
    let err = parse_err(&module_doc("  <description>not wrapped</description>\n"));
    assert_eq!(
        err.kind,
        ErrorKind::MissingChild { child: "text", parent: "description" }
    );
}

#[test]
fn test_error_message_value_carrier() {
    let doc = module_doc(
        "  <leaf name=\"x\">\n\
         \x20   <type name=\"string\">\n\
         \x20     <length value=\"1..4\">\n\
         \x20       <error-message><value>too long</value></error-message>\n\
         \x20     </length>\n\
         \x20   </type>\n\
         \x20 </leaf>\n",
    );
    let (module, _) = parse_module(doc.as_bytes()).expect("should parse");
    let yantra::parser::ast::DataNode::Leaf(leaf) = &module.data[0] else {
        panic!("expected leaf");
    };
    let length = leaf.type_.length.as_ref().expect("length");
    assert_eq!(length.error_message.as_deref(), Some("too long"));
}

#[test]
fn test_duplicate_text_child_is_duplicate_child() {
    let err = parse_err(&module_doc(
        "  <description><text>a</text><text>b</text></description>\n",
    ));
    assert_eq!(
        err.kind,
        ErrorKind::DuplicateChild { child: "text", parent: "description" }
    );
}

#[test]
fn test_empty_enum_name_is_rejected() {
    let err = parse_err(&module_doc(
        "  <leaf name=\"x\">\n\
         \x20   <type name=\"enumeration\"><enum name=\"\"/></type>\n\
         \x20 </leaf>\n",
    ));
    assert!(matches!(err.kind, ErrorKind::InvalidEnum { stmt: "enum", .. }));
}
