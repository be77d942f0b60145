//! Parser tests - deviations and the four deviate shapes.

use yantra::parse_module;
use yantra::parser::ErrorKind;
use yantra::parser::ast::Deviate;
use yantra::parser::flags::StmtFlags;

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

fn parse_first_deviation(body: &str) -> yantra::parser::ast::Deviation {
    let (module, _) = parse_module(module_doc(body).as_bytes()).expect("module should parse");
    module.deviations.into_iter().next().expect("one deviation")
}

fn parse_err(body: &str) -> yantra::ParseError {
    parse_module(module_doc(body).as_bytes()).expect_err("module should not parse")
}

#[test]
fn test_deviate_not_supported() {
    let dev = parse_first_deviation(
        "  <deviation target-node=\"/m:system\">\n\
         \x20   <deviate value=\"not-supported\"/>\n\
         \x20 </deviation>\n",
    );
    assert_eq!(&*dev.target, "/m:system");
    assert_eq!(dev.deviates.len(), 1);
    assert!(matches!(dev.deviates[0], Deviate::NotSupported { .. }));
}

#[test]
fn test_deviate_add_collects_all_destinations() {
    let dev = parse_first_deviation(
        "  <deviation target-node=\"/m:servers\">\n\
         \x20   <deviate value=\"add\">\n\
         \x20     <config value=\"false\"/>\n\
         \x20     <default value=\"a\"/>\n\
         \x20     <default value=\"b\"/>\n\
         \x20     <must condition=\". != ''\"/>\n\
         \x20     <unique tag=\"name\"/>\n\
         \x20     <units name=\"seconds\"/>\n\
         \x20     <min-elements value=\"1\"/>\n\
         \x20     <max-elements value=\"10\"/>\n\
         \x20   </deviate>\n\
         \x20 </deviation>\n",
    );
    let Deviate::Add(add) = &dev.deviates[0] else {
        panic!("expected deviate add");
    };
    assert!(add.flags.contains(StmtFlags::CONFIG_READ));
    assert_eq!(add.defaults.len(), 2);
    assert_eq!(add.musts.len(), 1);
    assert_eq!(add.uniques.len(), 1);
    assert_eq!(add.units.as_deref(), Some("seconds"));
    assert_eq!(add.min_elements, 1);
    assert_eq!(add.max_elements, 10);
    assert!(add.flags.contains(StmtFlags::SET_MIN));
    assert!(add.flags.contains(StmtFlags::SET_MAX));
}

#[test]
fn test_deviate_replace_with_type() {
    let dev = parse_first_deviation(
        "  <deviation target-node=\"/m:mtu\">\n\
         \x20   <deviate value=\"replace\">\n\
         \x20     <type name=\"uint32\"/>\n\
         \x20     <default value=\"9000\"/>\n\
         \x20   </deviate>\n\
         \x20 </deviation>\n",
    );
    let Deviate::Replace(rpl) = &dev.deviates[0] else {
        panic!("expected deviate replace");
    };
    let ty = rpl.type_.as_ref().expect("replacement type");
    assert_eq!(ty.name.as_deref(), Some("uint32"));
    assert_eq!(rpl.default.as_deref(), Some("9000"));
}

#[test]
fn test_deviate_delete() {
    let dev = parse_first_deviation(
        "  <deviation target-node=\"/m:servers\">\n\
         \x20   <deviate value=\"delete\">\n\
         \x20     <unique tag=\"name\"/>\n\
         \x20   </deviate>\n\
         \x20 </deviation>\n",
    );
    let Deviate::Delete(del) = &dev.deviates[0] else {
        panic!("expected deviate delete");
    };
    assert_eq!(del.uniques.len(), 1);
}

#[test]
fn test_multiple_deviates_keep_order() {
    let dev = parse_first_deviation(
        "  <deviation target-node=\"/m:x\">\n\
         \x20   <deviate value=\"delete\"><units name=\"s\"/></deviate>\n\
         \x20   <deviate value=\"add\"><units name=\"ms\"/></deviate>\n\
         \x20 </deviation>\n",
    );
    assert_eq!(dev.deviates.len(), 2);
    assert!(matches!(dev.deviates[0], Deviate::Delete(_)));
    assert!(matches!(dev.deviates[1], Deviate::Add(_)));
}

#[test]
fn test_mandatory_under_deviate_delete_is_shape_mismatch() {
    let err = parse_err(
        "  <deviation target-node=\"/m:x\">\n\
         \x20   <deviate value=\"delete\">\n\
         \x20     <mandatory value=\"true\"/>\n\
         \x20   </deviate>\n\
         \x20 </deviation>\n",
    );
    assert_eq!(
        err.kind,
        ErrorKind::InvalidDeviateSubstatement { child: "mandatory" }
    );
}

#[test]
fn test_type_under_deviate_add_is_shape_mismatch() {
    let err = parse_err(
        "  <deviation target-node=\"/m:x\">\n\
         \x20   <deviate value=\"add\">\n\
         \x20     <type name=\"uint8\"/>\n\
         \x20   </deviate>\n\
         \x20 </deviation>\n",
    );
    assert_eq!(err.kind, ErrorKind::InvalidDeviateSubstatement { child: "type" });
}

#[test]
fn test_description_under_deviate_is_plain_unexpected_child() {
    // description is no deviate substatement at all, so the generic error fires
    let err = parse_err(
        "  <deviation target-node=\"/m:x\">\n\
         \x20   <deviate value=\"add\">\n\
         \x20     <description><text>d</text></description>\n\
         \x20   </deviate>\n\
         \x20 </deviation>\n",
    );
    assert!(matches!(
        err.kind,
        ErrorKind::UnexpectedChild { ref child, parent: "deviate" } if child == "description"
    ));
}

#[test]
fn test_unknown_deviate_shape_rejected() {
    let err = parse_err(
        "  <deviation target-node=\"/m:x\">\n\
         \x20   <deviate value=\"remove\"/>\n\
         \x20 </deviation>\n",
    );
    assert!(matches!(
        err.kind,
        ErrorKind::InvalidEnum { ref value, stmt: "deviate", .. } if value == "remove"
    ));
}

#[test]
fn test_deviation_without_deviate_is_missing_child() {
    let err = parse_err(
        "  <deviation target-node=\"/m:x\">\n\
         \x20   <description><text>d</text></description>\n\
         \x20 </deviation>\n",
    );
    assert_eq!(
        err.kind,
        ErrorKind::MissingChild { child: "deviate", parent: "deviation" }
    );
}
