use formulary_attrs::ErrorKind;
use formulary_error::{Error, ErrorKind};

/// The variable has no value.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` has no value", self.name),
    labels = ["this variable"],
    help = "bind a value to it first",
)]
pub struct Missing {
    pub name: String,
}

/// Something went wrong.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = "something went wrong", labels = [""])]
pub struct Opaque;

fn render(error: &Error, src: &str) -> String {
    let report = error.report_to_string("input", src);
    String::from_utf8(strip_ansi_escapes::strip(report)).unwrap()
}

#[test]
fn report_contains_message_label_and_help() {
    let error = Error::new(vec![4..5], Missing { name: "x".to_string() });
    let report = render(&error, "(3)+(x)");

    assert!(report.contains("`x` has no value"));
    assert!(report.contains("this variable"));
    assert!(report.contains("bind a value to it first"));
    assert!(report.contains("(3)+(x)"));
}

#[test]
fn downcast_kind() {
    let error = Error::new(vec![0..1], Missing { name: "y".to_string() });
    assert!(error.is::<Missing>());
    assert!(!error.is::<Opaque>());
    assert_eq!(error.kind_as::<Missing>(), Some(&Missing { name: "y".to_string() }));
}

#[test]
fn unit_struct_report() {
    let error = Error::new(vec![0..3], Opaque);
    let report = render(&error, "abc");

    assert!(report.contains("something went wrong"));
    assert!(error.kind_as::<Missing>().is_none());
}
