use crate::report::classifier::ModuleClassifier;
use crate::report::error::{Error, NodeContext};
use crate::report::model::{Status, TestRecord};
use crate::report::status;
use crate::time::{duration_seconds, parse_timestamp};
use crate::xml::TreeNode;
use chrono::NaiveDateTime;
use regex::Regex;

const TEST: &str = "test";
const TEST_TYPE: &str = "type";
const TESTCASE: &str = "testcase";
const SECTION: &str = "section";
const PROLOG: &str = "prolog";
const EPILOG: &str = "epilog";
const NAME: &str = "name";
const TIME: &str = "time";
const MESSAGE: &str = "message";
const MESSAGE_TEXT: &str = "text";

/// How test units and their module are found in the log.
#[derive(Debug, Clone)]
pub enum Strategy {
    /// Every test case whose name matches the pattern is a unit; its module
    /// comes from its own messages.
    FlatByNamePattern(Regex),
    /// Every section below a test case is a unit; all sections of a test case
    /// share the module found in the test case's messages.
    NestedByContainerAndSection,
}

#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    pub include_all_logs: bool,
    pub classifier: ModuleClassifier,
    /// Namespace the report elements must be in, `None` for any.
    pub namespace: Option<String>,
}

pub struct Extractor {
    config: ExtractorConfig,
    strategy: Strategy,
}

struct Unit<N> {
    node: N,
    position: String,
    module: Option<String>,
}

impl Extractor {
    pub fn new(config: ExtractorConfig, strategy: Strategy) -> Self {
        Self { config, strategy }
    }

    /// Turns the test log below `root` into records numbered from 1 in
    /// document order.
    pub fn extract<N: TreeNode>(&self, root: &N) -> Result<Vec<TestRecord>, Error> {
        let units = match &self.strategy {
            Strategy::FlatByNamePattern(_) => self.flat_units(root),
            Strategy::NestedByContainerAndSection => self.nested_units(root),
        };
        debug!("Found {} candidate test units", units.len());

        let mut records = Vec::with_capacity(units.len());
        let mut skipped = 0usize;
        for unit in units {
            let name = self.unit_name(&unit)?;
            if let Strategy::FlatByNamePattern(pattern) = &self.strategy {
                if !pattern.is_match(&name) {
                    trace!("Skipping {} ('{}'), name does not match", unit.position, name);
                    skipped += 1;
                    continue;
                }
            }
            let record = self.extract_unit(unit, name, records.len() + 1)?;
            records.push(record);
        }
        info!("Extracted {} test records, skipped {}", records.len(), skipped);
        Ok(records)
    }

    fn ns(&self) -> Option<&str> {
        self.config.namespace.as_deref()
    }

    fn tests_of_type<N: TreeNode>(&self, node: &N, kind: &str) -> Vec<N> {
        node.descendants_named(self.ns(), TEST)
            .into_iter()
            .filter(|test| test.attr(TEST_TYPE) == Some(kind))
            .collect()
    }

    fn flat_units<N: TreeNode>(&self, root: &N) -> Vec<Unit<N>> {
        self.tests_of_type(root, TESTCASE)
            .into_iter()
            .enumerate()
            .map(|(i, node)| Unit {
                node,
                position: format!("{}[{}]", TEST, i + 1),
                module: None,
            })
            .collect()
    }

    fn nested_units<N: TreeNode>(&self, root: &N) -> Vec<Unit<N>> {
        let mut units = Vec::new();
        for (i, testcase) in self.tests_of_type(root, TESTCASE).into_iter().enumerate() {
            let module = self.config.classifier.classify(&self.messages(&testcase));
            debug!("Test case {} belongs to module '{}'", i + 1, module);
            let sections = self.tests_of_type(&testcase, SECTION);
            for (j, node) in sections.into_iter().enumerate() {
                units.push(Unit {
                    node,
                    position: format!("{}[{}]/{}[{}]", TESTCASE, i + 1, SECTION, j + 1),
                    module: Some(module.clone()),
                });
            }
        }
        units
    }

    fn unit_name<N: TreeNode>(&self, unit: &Unit<N>) -> Result<String, Error> {
        unit.node
            .child(self.ns(), PROLOG)
            .ok_or_else(|| malformed(unit, None, PROLOG))?
            .child(self.ns(), NAME)
            .map(|name| name.text().trim().to_owned())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| malformed(unit, None, NAME))
    }

    fn extract_unit<N: TreeNode>(
        &self,
        unit: Unit<N>,
        name: String,
        sequence_number: usize,
    ) -> Result<TestRecord, Error> {
        let start_time = self.marker_time(&unit, &name, PROLOG)?;
        let end_time = self.marker_time(&unit, &name, EPILOG)?;
        let duration_seconds = duration_seconds(&start_time, &end_time);
        if duration_seconds < 0f64 {
            warn!(
                "Test {} ('{}') ends {}s before it starts",
                unit.position, name, -duration_seconds
            );
        }

        let messages = self.messages(&unit.node);
        let status = status::resolve(&unit.node, self.ns());
        let module = match unit.module {
            Some(module) => module,
            None => self.config.classifier.classify(&messages),
        };
        let log_text = if self.config.include_all_logs || status == Status::Fail {
            messages
        } else {
            Vec::new()
        };
        trace!("Test {} ('{}') resolved to {}", unit.position, name, status);

        Ok(TestRecord {
            sequence_number,
            name,
            start_time,
            end_time,
            duration_seconds,
            status,
            log_text,
            module,
            comment: String::new(),
        })
    }

    fn marker_time<N: TreeNode>(
        &self,
        unit: &Unit<N>,
        name: &str,
        marker: &'static str,
    ) -> Result<NaiveDateTime, Error> {
        let time = unit
            .node
            .child(self.ns(), marker)
            .ok_or_else(|| malformed(unit, Some(name), marker))?
            .attr(TIME)
            .map(str::to_owned)
            .ok_or_else(|| malformed(unit, Some(name), TIME))?;
        parse_timestamp(&time).map_err(|source| Error::MalformedTimestamp {
            node: context(unit, Some(name)),
            marker,
            source,
        })
    }

    /// Trimmed texts of all messages below `node`, in document order.
    fn messages<N: TreeNode>(&self, node: &N) -> Vec<String> {
        node.descendants_named(self.ns(), MESSAGE)
            .into_iter()
            .filter_map(|message| message.child(self.ns(), MESSAGE_TEXT))
            .map(|text| text.text().trim().to_owned())
            .collect()
    }
}

fn context<N>(unit: &Unit<N>, name: Option<&str>) -> NodeContext {
    NodeContext {
        position: unit.position.clone(),
        name: name.map(str::to_owned),
    }
}

fn malformed<N>(unit: &Unit<N>, name: Option<&str>, missing: &'static str) -> Error {
    Error::MalformedTestNode {
        node: context(unit, name),
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::model::UNKNOWN_MODULE;
    use crate::xml::document::{parse, root_element};
    use crate::xml::SQUISH_XML3_NAMESPACE;

    fn report(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<SquishReport xmlns="{}" version="3.4">{}</SquishReport>"#,
            SQUISH_XML3_NAMESPACE, body
        )
    }

    fn unit(kind: &str, name: &str, start: &str, end: &str, messages: &[&str], outcome: Option<&str>) -> String {
        let messages: String = messages
            .iter()
            .map(|m| format!(r#"<message type="LOG" time="{}"><text>{}</text></message>"#, start, m))
            .collect();
        let verification = outcome
            .map(|o| {
                format!(
                    r#"<verification><scriptedVerificationResult time="{}" type="{}"/></verification>"#,
                    end, o
                )
            })
            .unwrap_or_default();
        format!(
            r#"<test type="{}"><prolog time="2024-03-01T{}"><name>{}</name></prolog>{}{}<epilog time="2024-03-01T{}"/></test>"#,
            kind, start, name, messages, verification, end
        )
    }

    fn testcase(name: &str, messages: &[&str], sections: &[String]) -> String {
        let messages: String = messages
            .iter()
            .map(|m| format!(r#"<message type="LOG"><text>{}</text></message>"#, m))
            .collect();
        format!(
            r#"<test type="testcase"><prolog time="2024-03-01T09:59:59.000Z"><name>{}</name></prolog>{}{}<epilog time="2024-03-01T10:10:00.000Z"/></test>"#,
            name,
            messages,
            sections.concat()
        )
    }

    fn config(include_all_logs: bool) -> ExtractorConfig {
        ExtractorConfig {
            include_all_logs,
            classifier: ModuleClassifier::new(vec!["Login", "Recipe"]),
            namespace: Some(SQUISH_XML3_NAMESPACE.to_owned()),
        }
    }

    fn flat() -> Strategy {
        Strategy::FlatByNamePattern(Regex::new(r"(?i)^\s*test\s*case\s*\d+\b").unwrap())
    }

    fn run(xml: &str, include_all_logs: bool, strategy: Strategy) -> Result<Vec<TestRecord>, Error> {
        let package = parse(xml).unwrap();
        let document = package.as_document();
        let root = root_element(&document).unwrap();
        Extractor::new(config(include_all_logs), strategy).extract(&root)
    }

    #[test]
    fn test_nested_sections_inherit_container_module() {
        let xml = report(&testcase(
            "tst_login",
            &["Login"],
            &[
                unit("section", "A", "10:00:00.000Z", "10:00:02.500Z", &["typing user"], Some("PASS")),
                unit("section", "B", "10:00:02.500Z", "10:00:05.000Z", &["clicking ok"], None),
            ],
        ));
        let records = run(&xml, false, Strategy::NestedByContainerAndSection).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].sequence_number, 1);
        assert_eq!(records[0].name, "A");
        assert_eq!(records[0].module, "Login");
        assert_eq!(records[0].status, Status::Pass);
        assert_eq!(records[0].duration_seconds, 2.5);
        assert!(records[0].log_text.is_empty());
        assert_eq!(records[0].comment, "");

        assert_eq!(records[1].sequence_number, 2);
        assert_eq!(records[1].module, "Login");
        assert_eq!(records[1].status, Status::Fail);
        assert_eq!(records[1].duration_seconds, 2.5);
        assert_eq!(records[1].log_text, vec!["clicking ok".to_owned()]);
    }

    #[test]
    fn test_sequence_numbers_span_test_cases() {
        let xml = report(&[
            testcase("tst_a", &["Recipe"], &[
                unit("section", "A1", "10:00:00.000Z", "10:00:01.000Z", &[], Some("PASS")),
            ]),
            testcase("tst_b", &["nothing known"], &[
                unit("section", "B1", "10:00:01.000Z", "10:00:02.000Z", &[], Some("PASS")),
                unit("section", "B2", "10:00:02.000Z", "10:00:03.000Z", &[], Some("FAIL")),
            ]),
        ]
        .concat());
        let records = run(&xml, false, Strategy::NestedByContainerAndSection).unwrap();

        let numbers: Vec<usize> = records.iter().map(|r| r.sequence_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(records[0].module, "Recipe");
        assert_eq!(records[1].module, UNKNOWN_MODULE);
        assert_eq!(records[2].status, Status::Fail);
    }

    #[test]
    fn test_flat_mode_skips_non_matching_names() {
        let xml = report(&[
            unit("testcase", "Test Case 1", "10:00:00.000Z", "10:00:01.000Z", &["Login"], Some("PASS")),
            unit("testcase", "setup", "10:00:01.000Z", "10:00:02.000Z", &["Login"], Some("PASS")),
            unit("testcase", "test case 2 - recipe", "10:00:02.000Z", "10:00:03.000Z", &["recipe"], Some("FAIL")),
            unit("testcase", "tst_case_3", "10:00:03.000Z", "10:00:04.000Z", &[], None),
        ]
        .concat());
        let records = run(&xml, false, flat()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Test Case 1");
        assert_eq!(records[0].sequence_number, 1);
        assert_eq!(records[0].module, "Login");
        assert_eq!(records[1].name, "test case 2 - recipe");
        assert_eq!(records[1].sequence_number, 2);
        assert_eq!(records[1].module, "Recipe");
        assert_eq!(records[1].log_text, vec!["recipe".to_owned()]);
    }

    #[test]
    fn test_include_all_logs_keeps_passing_logs() {
        let xml = report(&unit(
            "testcase",
            "Test Case 7",
            "10:00:00.000+05:30",
            "10:00:00.000+05:30",
            &["Login", " step two "],
            Some("PASS"),
        ));
        let records = run(&xml, true, flat()).unwrap();

        assert_eq!(records[0].status, Status::Pass);
        assert_eq!(records[0].duration_seconds, 0.0);
        assert_eq!(records[0].log_text, vec!["Login".to_owned(), "step two".to_owned()]);
    }

    #[test]
    fn test_elements_outside_namespace_are_ignored() {
        let xml = format!(
            "<SquishReport>{}</SquishReport>",
            unit("testcase", "Test Case 1", "10:00:00.000Z", "10:00:01.000Z", &[], Some("PASS"))
        );
        assert!(run(&xml, false, flat()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_epilog_aborts() {
        let section = r#"<test type="section"><prolog time="2024-03-01T10:00:00.000Z"><name>A</name></prolog></test>"#;
        let xml = report(&testcase("tst_login", &["Login"], &[section.to_owned()]));
        let err = run(&xml, false, Strategy::NestedByContainerAndSection).unwrap_err();

        match err {
            Error::MalformedTestNode { node, missing } => {
                assert_eq!(missing, EPILOG);
                assert_eq!(node.position, "testcase[1]/section[1]");
                assert_eq!(node.name.as_deref(), Some("A"));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_missing_prolog_aborts_even_in_flat_mode() {
        let xml = report(r#"<test type="testcase"><epilog time="2024-03-01T10:00:00.000Z"/></test>"#);
        let err = run(&xml, false, flat()).unwrap_err();

        match err {
            Error::MalformedTestNode { node, missing } => {
                assert_eq!(missing, PROLOG);
                assert_eq!(node.position, "test[1]");
                assert_eq!(node.name, None);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_missing_name_aborts() {
        let section = r#"<test type="section"><prolog time="2024-03-01T10:00:00.000Z"><name>  </name></prolog><epilog time="2024-03-01T10:00:01.000Z"/></test>"#;
        let nameless = r#"<test type="section"><prolog time="2024-03-01T10:00:00.000Z"/><epilog time="2024-03-01T10:00:01.000Z"/></test>"#;
        for body in &[section, nameless] {
            let xml = report(&testcase("tst_login", &["Login"], &[body.to_string()]));
            let err = run(&xml, false, Strategy::NestedByContainerAndSection).unwrap_err();

            assert_eq!(
                err,
                Error::MalformedTestNode {
                    node: NodeContext {
                        position: "testcase[1]/section[1]".to_owned(),
                        name: None,
                    },
                    missing: NAME,
                }
            );
        }
    }

    #[test]
    fn test_marker_without_time_aborts() {
        let no_start = r#"<test type="testcase"><prolog><name>Test Case 1</name></prolog><epilog time="2024-03-01T10:00:01.000Z"/></test>"#;
        let no_end = r#"<test type="testcase"><prolog time="2024-03-01T10:00:00.000Z"><name>Test Case 1</name></prolog><epilog/></test>"#;
        for body in &[no_start, no_end] {
            let err = run(&report(body), false, flat()).unwrap_err();

            assert_eq!(
                err,
                Error::MalformedTestNode {
                    node: NodeContext {
                        position: "test[1]".to_owned(),
                        name: Some("Test Case 1".to_owned()),
                    },
                    missing: TIME,
                }
            );
        }
    }

    #[test]
    fn test_bad_timestamp_aborts() {
        let xml = report(&unit("testcase", "Test Case 1", "10:00:00Z", "10:00:01.000Z", &[], None));
        let err = run(&xml, false, flat()).unwrap_err();

        assert!(matches!(err, Error::MalformedTimestamp { marker: PROLOG, .. }));
    }
}
