use shared_types::*;
use std::fs;
use std::path::Path;
use ts_rs::TS;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut types = Vec::new();

    // Contact types
    types.push(clean_type(ContactRecord::export_to_string()?));
    types.push(clean_type(ContactsResponse::export_to_string()?));

    // Notification types
    types.push(clean_type(NotificationLevel::export_to_string()?));
    types.push(clean_type(Notification::export_to_string()?));
    types.push(clean_type(NotificationResponse::export_to_string()?));

    // Export types
    types.push(clean_type(ExportEntry::export_to_string()?));
    types.push(clean_type(PickerOptions::export_to_string()?));
    types.push(clean_type(PickerRequest::export_to_string()?));
    types.push(clean_type(ExportOutcome::export_to_string()?));
    types.push(clean_type(ExportResponse::export_to_string()?));

    let output_dir = Path::new("../web/src/api-types");
    fs::create_dir_all(output_dir)?;

    let output_path = output_dir.join("types.ts");
    let output = types.join("\n\n");

    fs::write(&output_path, output)?;
    println!("Generated TypeScript types in {}", output_path.display());

    Ok(())
}

fn clean_type(mut type_def: String) -> String {
    type_def.retain(|c| c != '\r');

    // Every type lands in the same types.ts, so cross-file imports are dropped
    let filtered: Vec<&str> = type_def
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("import type")
                && !trimmed.starts_with("// This file was generated")
                && !trimmed.starts_with("/* This file was generated")
        })
        .collect();

    let result = filtered.join("\n").trim().to_string();
    if result.is_empty() {
        result
    } else {
        format!("{}\n", result)
    }
}
