#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use crate::types::FailedTestRef;

peg::parser! {
    /// includes some useful grammars for parsing pytest console output.
    pub grammar parser() for str {
        /// matches spaces and tabs
        rule whitespace() = quiet!{[' ' | '\t']+}

        /// matches a test id (`path::function`), which runs to the first
        /// whitespace of the short summary line
        rule test_id() -> String
            = id:$([^ ' ' | '\t']+) { id.to_string() }

        /// parses a `FAILED path::test - message` line as printed in the
        /// engine's short test summary
        pub rule failed_summary_line() -> FailedTestRef
            = "FAILED" whitespace() id:test_id()
              msg:(" - " m:$([_]*) { m.to_string() })?
              whitespace()?
            {
                FailedTestRef {
                    test_id: id,
                    message: msg.map(|m| m.trim().to_string()).unwrap_or_default(),
                }
            }

        /// returns the value after the first colon of a `label: value` line,
        /// trimmed of surrounding whitespace
        pub rule labeled_value() -> String
            = [^ ':']* ":" v:$([_]*) { v.trim().to_string() }
    }
}
