use pygrade::notify::moodle::{MoodleError, parse_response};

const SUCCESS: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<RESPONSE>
    <SINGLE>
        <KEY name="name"><VALUE>success</VALUE></KEY>
        <KEY name="message"><VALUE>Grade updated</VALUE></KEY>
    </SINGLE>
</RESPONSE>"#;

const PLUGIN_ERROR: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<RESPONSE>
    <SINGLE>
        <KEY name="name"><VALUE>failure</VALUE></KEY>
        <KEY name="message"><VALUE>Assignment not found\nCheck the assignment name</VALUE></KEY>
    </SINGLE>
</RESPONSE>"#;

const SERVER_ERROR: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<EXCEPTION class="webservice_access_exception">
    <ERRORCODE>accessexception</ERRORCODE>
    <MESSAGE>Access control exception</MESSAGE>
</EXCEPTION>"#;

const UNRECOGNISED: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<RESPONSE><SINGLE><KEY name="status"><VALUE>weird</VALUE></KEY></SINGLE></RESPONSE>"#;

#[test]
fn success_response_is_accepted() {
    assert!(parse_response(SUCCESS).is_ok());
}

#[test]
fn xml_embedded_in_a_larger_blob_is_still_found() {
    let body = format!("Some PHP notice first.\n{SUCCESS}\ntrailing noise");
    assert!(parse_response(&body).is_ok());
}

#[test]
fn plugin_errors_surface_the_message_key_with_unescaped_newlines() {
    let error = parse_response(PLUGIN_ERROR).expect_err("plugin error must fail");

    match &error {
        MoodleError::Rejected(message) => {
            assert_eq!(message, "Assignment not found\nCheck the assignment name");
        }
        other => panic!("expected a rejection, got {other:?}"),
    }
    assert!(format!("{error}").contains("Upload to Moodle failed"));
}

#[test]
fn server_errors_surface_the_message_element() {
    let error = parse_response(SERVER_ERROR).expect_err("server error must fail");

    match error {
        MoodleError::Rejected(message) => assert_eq!(message, "Access control exception"),
        other => panic!("expected a rejection, got {other:?}"),
    }
}

#[test]
fn unrecognised_xml_is_dumped_raw() {
    let error = parse_response(UNRECOGNISED).expect_err("unrecognised response must fail");

    match &error {
        MoodleError::Unrecognised(xml) => assert!(xml.contains(r#"<KEY name="status">"#)),
        other => panic!("expected an unrecognised response, got {other:?}"),
    }
}

#[test]
fn response_without_xml_marker_terminates_the_submission() {
    let error = parse_response("<html><body>Maintenance</body></html>")
        .expect_err("non-XML response must fail");

    assert!(matches!(error, MoodleError::MissingXml));
}
