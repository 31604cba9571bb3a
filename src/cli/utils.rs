use serde_json::json;

use crate::admin::WorkflowReport;
use crate::cli::OutputFormat;

/// Output a workflow report in the appropriate format
pub fn output_report(output_format: &OutputFormat, report: &WorkflowReport) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let response = json!({
                "success": report.succeeded(),
                "report": report,
            });
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            if let Some(lookup) = &report.lookup {
                println!(
                    "  {} {} -> {} ({})",
                    lookup.action.as_str(),
                    lookup.target,
                    report.room_id.as_deref().unwrap_or("null"),
                    lookup.status
                );
            }
            for step in &report.steps {
                let mark = if step.is_success() { "✓" } else { "✗" };
                println!("{} {} {} ({})", mark, step.action.as_str(), step.target, step.status);
            }
            if let Some(count) = report.num_quarantined {
                println!("Quarantined media items: {}", count);
            }
            let failed = report.failures().count();
            if failed > 0 {
                eprintln!("Error: {} of {} steps failed", failed, report.steps.len());
            }
        }
    }
    Ok(())
}

/// Output the result of an alias lookup in the appropriate format
pub fn output_resolved(
    output_format: &OutputFormat,
    alias: &str,
    room_id: Option<&str>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({
                "alias": alias,
                "room_id": room_id,
            }))?);
        }
        OutputFormat::Text => match room_id {
            Some(room_id) => println!("{} -> {}", alias, room_id),
            None => println!("{} does not resolve", alias),
        },
    }
    Ok(())
}
