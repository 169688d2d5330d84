use crate::report::model::Status;
use crate::xml::TreeNode;

const VERIFICATION: &str = "verification";
const VERIFICATION_RESULT: &str = "scriptedVerificationResult";
const OUTCOME: &str = "type";

/// Outcome of a test unit taken from its first verification result.
///
/// A unit without any verification result, or with an outcome other than
/// `PASS`, counts as failed.
pub fn resolve<N: TreeNode>(unit: &N, namespace: Option<&str>) -> Status {
    let result = unit
        .descendants_named(namespace, VERIFICATION)
        .into_iter()
        .find_map(|verification| verification.child(namespace, VERIFICATION_RESULT));
    match result {
        Some(result) => normalize(result.attr(OUTCOME)),
        None => {
            trace!("No verification result found, resolving to {}", Status::Fail);
            Status::Fail
        }
    }
}

fn normalize(outcome: Option<&str>) -> Status {
    match outcome.map(str::trim) {
        Some(outcome) if outcome.eq_ignore_ascii_case("pass") => Status::Pass,
        _ => Status::Fail,
    }
}
