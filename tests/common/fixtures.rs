//! Static event corpora used across harnesses.

/// Milliseconds since the epoch carried by [`SAMPLE_EVENT`].
pub const SAMPLE_MILLIS: i64 = 1_184_286_222_308;

/// A complete single-line event with one property.
pub const SAMPLE_EVENT: &str = r#"<log4j:event logger="App.Worker" timestamp="1184286222308" level="ERROR" thread="1"><log4j:message>Boom</log4j:message><log4j:properties><log4j:data name="host" value="srv1"/></log4j:properties></log4j:event>"#;

/// Events as log4j's `XMLLayout` writes them: pretty-printed, separated by
/// blank lines, with location info and a throwable.
pub const XML_LAYOUT_STREAM: &str = r#"<log4j:event logger="com.acme.Billing" timestamp="1700000000000" level="INFO" thread="main">
<log4j:message><![CDATA[invoice 42 issued]]></log4j:message>
<log4j:locationInfo class="com.acme.Billing" method="issue" file="Billing.java" line="88"/>
<log4j:properties>
<log4j:data name="tenant" value="acme"/>
<log4j:data name="log4jmachinename" value="build-01"/>
</log4j:properties>
</log4j:event>

<log4j:event logger="com.acme.Billing" timestamp="1700000000250" level="ERROR" thread="worker-3">
<log4j:message><![CDATA[invoice 43 failed]]></log4j:message>
<log4j:throwable><![CDATA[java.lang.IllegalStateException: ledger closed
	at com.acme.Ledger.post(Ledger.java:17)]]></log4j:throwable>
</log4j:event>

"#;

/// Inputs that are not a readable log4j event.
pub const MALFORMED_INPUTS: &[&str] = &[
    "",
    "plain text, no markup",
    "<log4j:event logger=\"a\"",
    "<log4j:event logger=\"a\"><log4j:message>unterminated",
    "<log4j:record logger=\"a\"/>",
    "<foo:event xmlns:foo=\"urn:not-log4j\" logger=\"a\"/>",
    "<log4j:event logger=\"a\"></log4j:other>",
    "hello <log4j:event logger=\"a\"/>",
];
