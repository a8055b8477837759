//! Rebuilds a [`TaskDescriptor`] from `schtasks /Query /XML` output.
//!
//! Only the fields the registrar wrote are extracted; the rest of the
//! task definition (author, principal, idle settings) is ignored. The
//! exported XML is machine-generated with one element per field name
//! we care about, so plain tag scanning is enough.

use std::path::PathBuf;
use std::time::Duration;

use mailboot_core::{RestartPolicy, RunConditions, StoreError, TaskDescriptor, Trigger};

use crate::iso8601;

/// Parses the exported task XML into a descriptor named `name`.
pub fn parse_descriptor(name: &str, xml: &str) -> Result<TaskDescriptor, StoreError> {
    let command = tag_text(xml, "Command")
        .map(unescape)
        .ok_or_else(|| StoreError::Platform(format!("task XML for '{name}' has no <Command>")))?;

    let arguments = tag_text(xml, "Arguments")
        .map(|a| split_arguments(&unescape(a)))
        .unwrap_or_default();

    let working_directory = tag_text(xml, "WorkingDirectory")
        .map(|w| PathBuf::from(unescape(w)))
        .unwrap_or_default();

    let delay = tag_text(xml, "Delay")
        .and_then(iso8601::parse)
        .unwrap_or(Duration::ZERO);

    // Restart settings live inside <RestartOnFailure>; scan only that
    // section so an unrelated <Count> elsewhere can't leak in.
    let restart_policy = tag_text(xml, "RestartOnFailure")
        .map(|section| RestartPolicy {
            max_attempts: tag_text(section, "Count")
                .and_then(|c| c.trim().parse().ok())
                .unwrap_or(0),
            interval: tag_text(section, "Interval")
                .and_then(iso8601::parse)
                .unwrap_or(Duration::ZERO),
        })
        .unwrap_or_else(RestartPolicy::none);

    let run_conditions = RunConditions {
        allow_on_battery: tag_text(xml, "DisallowStartIfOnBatteries") != Some("true"),
        stop_on_battery: tag_text(xml, "StopIfGoingOnBatteries") == Some("true"),
    };

    let execution_time_limit = tag_text(xml, "ExecutionTimeLimit")
        .and_then(iso8601::parse)
        .unwrap_or(Duration::ZERO);

    Ok(TaskDescriptor {
        name: name.to_string(),
        command: PathBuf::from(command),
        arguments,
        working_directory,
        trigger: Trigger::AtLogon { delay },
        restart_policy,
        run_conditions,
        execution_time_limit,
    })
}

/// Returns the text between `<tag>` and `</tag>`, nested markup
/// included, or `None` when the tag is absent.
fn tag_text<'a>(xml: &'a str, tag: &str) -> Option<&'a str> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let start = xml.find(&open)? + open.len();
    let end = xml[start..].find(&close)? + start;
    Some(&xml[start..end])
}

/// Undoes the XML entity escaping schtasks applies to text content.
fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Splits the stored argument string back into a list, honoring the
/// double quotes around whitespace-containing parts.
fn split_arguments(s: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    for c in s.chars() {
        match c {
            '"' => quoted = !quoted,
            ' ' if !quoted => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        args.push(current);
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Trimmed-down version of what `schtasks /Query /XML` exports for
    /// a task registered by the powershell pipeline.
    const SERVER_XML: &str = r#"<?xml version="1.0" encoding="UTF-16"?>
<Task version="1.4" xmlns="http://schemas.microsoft.com/windows/2004/02/mit/task">
  <Triggers>
    <LogonTrigger>
      <Enabled>true</Enabled>
      <Delay>PT30S</Delay>
    </LogonTrigger>
  </Triggers>
  <Settings>
    <DisallowStartIfOnBatteries>false</DisallowStartIfOnBatteries>
    <StopIfGoingOnBatteries>false</StopIfGoingOnBatteries>
    <ExecutionTimeLimit>PT72H</ExecutionTimeLimit>
    <RestartOnFailure>
      <Interval>PT1M</Interval>
      <Count>3</Count>
    </RestartOnFailure>
  </Settings>
  <Actions Context="Author">
    <Exec>
      <Command>C:\Python\python.exe</Command>
      <Arguments>"C:\mail &amp; boot\outlook_mcp.py"</Arguments>
      <WorkingDirectory>C:\mail &amp; boot</WorkingDirectory>
    </Exec>
  </Actions>
</Task>"#;

    #[test]
    fn parses_the_registered_fields() {
        // Act
        let task = parse_descriptor("MailAutomationServer", SERVER_XML).unwrap();

        // Assert
        assert_eq!(task.name, "MailAutomationServer");
        assert_eq!(task.command, PathBuf::from(r"C:\Python\python.exe"));
        assert_eq!(task.arguments, [r"C:\mail & boot\outlook_mcp.py"]);
        assert_eq!(task.working_directory, PathBuf::from(r"C:\mail & boot"));
        assert_eq!(
            task.trigger,
            Trigger::AtLogon {
                delay: Duration::from_secs(30)
            }
        );
        assert_eq!(task.restart_policy.max_attempts, 3);
        assert_eq!(task.restart_policy.interval, Duration::from_secs(60));
        assert!(task.run_conditions.allow_on_battery);
        assert!(!task.run_conditions.stop_on_battery);
        assert_eq!(task.execution_time_limit, Duration::from_secs(72 * 3600));
    }

    #[test]
    fn missing_optional_fields_fall_back() {
        // Arrange: a minimal definition with only a command.
        let xml = "<Task><Actions><Exec><Command>notepad.exe</Command></Exec></Actions></Task>";

        // Act
        let task = parse_descriptor("Bare", xml).unwrap();

        // Assert
        assert!(task.arguments.is_empty());
        assert_eq!(task.trigger.delay(), Duration::ZERO);
        assert_eq!(task.restart_policy, RestartPolicy::none());
        assert_eq!(task.execution_time_limit, Duration::ZERO);
    }

    #[test]
    fn missing_command_is_a_platform_error() {
        let result = parse_descriptor("Broken", "<Task></Task>");

        assert!(matches!(result, Err(StoreError::Platform(_))));
    }

    #[test]
    fn splits_quoted_arguments() {
        assert_eq!(
            split_arguments(r#""C:\a b\s.py" --flag value"#),
            [r"C:\a b\s.py", "--flag", "value"]
        );
    }
}
