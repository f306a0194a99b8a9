// Rust guideline compliant 2026-10-16

//! Output formatting module for the Adoptly CLI.
//!
//! This module renders pets, confirmations and errors as JSON envelopes,
//! tables or plain text.

use adoptly_app::{AppError, Confirmation, ErrorEnvelope, SuccessEnvelope};
use adoptly_core::{Pet, Principal};
use chrono::{TimeZone, Utc};
use serde::Serialize;
use serde_json::json;
use std::io::Write;
use tabled::{builder::Builder, settings::Style};
use termcolor::{Ansi, Color, ColorSpec, WriteColor};

/// Output formatter trait.
///
/// Defines the interface for formatting Adoptly data in different output formats.
pub trait OutputFormatter {
    /// Formats a single pet for display.
    ///
    /// # Arguments
    /// * `pet` - The pet to format
    ///
    /// # Returns
    /// A formatted string representation of the pet
    fn format_pet(&self, pet: &Pet) -> String;

    /// Formats a newly created listing.
    fn format_created(&self, pet: &Pet) -> String;

    /// Formats a list of pets for display.
    ///
    /// # Arguments
    /// * `pets` - The pets to format
    ///
    /// # Returns
    /// A formatted string representation of the list
    fn format_list(&self, pets: &[Pet]) -> String;

    /// Formats the result of a mutating operation.
    fn format_confirmation(&self, confirmation: &Confirmation) -> String;

    /// Formats a freshly registered principal and its one-time token.
    fn format_principal(&self, principal: &Principal, token: &str) -> String;

    /// Formats an error for display.
    ///
    /// # Arguments
    /// * `error` - The error to format
    ///
    /// # Returns
    /// A formatted error string
    fn format_error(&self, error: &AppError) -> String;
}

/// JSON output formatter.
///
/// Wraps every payload in the standard success or error envelope.
pub struct JsonFormatter;

impl JsonFormatter {
    fn render<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| {
            json!({ "code": "operation_failed", "message": "Failed to serialize output" })
                .to_string()
        })
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_pet(&self, pet: &Pet) -> String {
        Self::render(&SuccessEnvelope::new(pet))
    }

    fn format_created(&self, pet: &Pet) -> String {
        Self::render(&SuccessEnvelope::created(pet).with_message("Pet listed for adoption"))
    }

    fn format_list(&self, pets: &[Pet]) -> String {
        Self::render(&SuccessEnvelope::new(json!({
            "pets": pets,
            "total": pets.len(),
        })))
    }

    fn format_confirmation(&self, confirmation: &Confirmation) -> String {
        Self::render(
            &SuccessEnvelope::new(json!({
                "pet_id": confirmation.pet_id,
                "state": confirmation.state,
            }))
            .with_message(confirmation.message.clone()),
        )
    }

    fn format_principal(&self, principal: &Principal, token: &str) -> String {
        Self::render(
            &SuccessEnvelope::created(json!({
                "principal": principal,
                "token": token,
            }))
            .with_message("Store this token now, it will not be shown again"),
        )
    }

    fn format_error(&self, error: &AppError) -> String {
        Self::render(&ErrorEnvelope::from_error(error))
    }
}

/// Table output formatter.
///
/// Formats pets as human-readable tables.
pub struct TableFormatter {
    use_color: bool,
}

impl TableFormatter {
    /// Creates a new table formatter.
    ///
    /// # Arguments
    /// * `use_color` - Whether to use colored output
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn paint(&self, text: &str, color: Color, bold: bool) -> String {
        if !self.use_color {
            return text.to_string();
        }
        let mut out = Ansi::new(Vec::new());
        let _ = out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(bold));
        let _ = write!(out, "{}", text);
        let _ = out.reset();
        String::from_utf8_lossy(&out.into_inner()).into_owned()
    }
}

impl OutputFormatter for TableFormatter {
    fn format_pet(&self, pet: &Pet) -> String {
        let mut output = String::new();

        output.push_str(&format!("ID:       {}\n", pet.id));
        output.push_str(&format!("Name:     {}\n", pet.name));
        output.push_str(&format!("Age:      {}\n", pet.age));
        output.push_str(&format!("Weight:   {} kg\n", pet.weight));
        output.push_str(&format!("Color:    {}\n", pet.color));
        output.push_str(&format!("State:    {}\n", pet.state()));
        output.push_str(&format!("Owner:    {} ({})\n", pet.owner.name, pet.owner.phone));
        if let Some(adopter) = &pet.adopter {
            output.push_str(&format!("Adopter:  {}\n", adopter.name));
        }
        output.push_str(&format!("Images:   {}\n", pet.images.join(", ")));
        output.push_str(&format!("Listed:   {}\n", format_millis(pet.created_at)));
        output.push_str(&format!("Updated:  {}\n", format_millis(pet.updated_at)));

        output
    }

    fn format_created(&self, pet: &Pet) -> String {
        format!(
            "{} Listed {} ({})\n{}",
            self.paint("✓", Color::Green, true),
            pet.name,
            pet.id,
            self.format_pet(pet)
        )
    }

    fn format_list(&self, pets: &[Pet]) -> String {
        if pets.is_empty() {
            return "No pets found.".to_string();
        }

        let mut builder = Builder::default();
        builder.push_record(vec!["ID", "Name", "Age", "Color", "State", "Owner", "Listed"]);

        for pet in pets {
            builder.push_record(vec![
                pet.id.clone(),
                pet.name.clone(),
                pet.age.to_string(),
                pet.color.clone(),
                pet.state().to_string(),
                pet.owner.name.clone(),
                format_millis(pet.created_at),
            ]);
        }

        let mut table = builder.build();
        table.with(Style::modern());

        table.to_string()
    }

    fn format_confirmation(&self, confirmation: &Confirmation) -> String {
        format!("{} {}", self.paint("✓", Color::Green, true), confirmation.message)
    }

    fn format_principal(&self, principal: &Principal, token: &str) -> String {
        format!(
            "{} Registered {} ({})\nToken: {}\n{}",
            self.paint("✓", Color::Green, true),
            principal.name,
            principal.id,
            token,
            self.paint("Store this token now, it will not be shown again.", Color::Yellow, false),
        )
    }

    fn format_error(&self, error: &AppError) -> String {
        format!("{} {}", self.paint("Error:", Color::Red, true), error)
    }
}

/// Plain text output formatter.
///
/// Formats pets as simple whitespace-separated lines.
pub struct PlainFormatter;

impl OutputFormatter for PlainFormatter {
    fn format_pet(&self, pet: &Pet) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n", pet.id));
        output.push_str(&format!("{}\n", pet.name));
        output.push_str(&format!("{}\n", pet.age));
        output.push_str(&format!("{}\n", pet.weight));
        output.push_str(&format!("{}\n", pet.color));
        output.push_str(&format!("{}\n", pet.state()));
        output.push_str(&format!("{}\n", pet.owner.name));

        output
    }

    fn format_created(&self, pet: &Pet) -> String {
        pet.id.clone()
    }

    fn format_list(&self, pets: &[Pet]) -> String {
        if pets.is_empty() {
            return "No pets found.".to_string();
        }

        let mut output = String::new();
        for pet in pets {
            output.push_str(&format!("{} {} {}\n", pet.id, pet.state(), pet.name));
        }
        output
    }

    fn format_confirmation(&self, confirmation: &Confirmation) -> String {
        confirmation.message.clone()
    }

    fn format_principal(&self, principal: &Principal, token: &str) -> String {
        format!("{} {}", principal.id, token)
    }

    fn format_error(&self, error: &AppError) -> String {
        format!("Error: {}", error)
    }
}

/// Renders epoch milliseconds as a UTC timestamp.
fn format_millis(millis: i64) -> String {
    Utc.timestamp_millis_opt(millis)
        .single()
        .map(|ts| ts.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| millis.to_string())
}

/// Factory function to create an appropriate formatter.
///
/// # Arguments
/// * `format` - The desired output format ("json", "table", or "plain")
/// * `use_color` - Whether to use colored output (ignored for JSON)
///
/// # Returns
/// A boxed OutputFormatter instance
pub fn create_formatter(format: &str, use_color: bool) -> Box<dyn OutputFormatter> {
    match format {
        "json" => Box::new(JsonFormatter),
        "plain" => Box::new(PlainFormatter),
        _ => Box::new(TableFormatter::new(use_color)),
    }
}
