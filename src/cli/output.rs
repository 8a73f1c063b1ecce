//! Terminal rendering of descriptors, completions and notifications

use crate::core::descriptor::MediaDescriptor;
use crate::dispatch::CompletionRecord;
use crate::notify::{NotificationCenter, Severity};
use colored::Colorize;

/// Print a resolved descriptor
pub fn print_descriptor(descriptor: &MediaDescriptor) {
    println!("{}", descriptor.title.bold());
    println!("  id        {}", descriptor.id);
    println!("  source    {}", descriptor.source_url);
    println!("  duration  {}", descriptor.duration_display());
    println!("  thumbnail {}", descriptor.thumbnail_url);
    println!("  variants:");
    for tag in &descriptor.variants {
        println!(
            "    {:<6} {:<9} {}",
            tag.to_string().cyan(),
            tag.quality_label(),
            descriptor.locator(*tag).unwrap_or("-")
        );
    }
}

/// Print a completion record
pub fn print_completion(record: &CompletionRecord) {
    println!(
        "{} {} ({}) at {}",
        "Saved as".green(),
        record.filename.bold(),
        record.variant.quality_label(),
        record.timestamp.format("%H:%M:%S")
    );
}

/// Render the live notification feed in creation order.
///
/// A pure projection of the center's current set: call it again after any
/// operation and the whole feed is redrawn from scratch.
pub fn render_notifications(center: &NotificationCenter) {
    for notification in center.active() {
        let message = match notification.severity {
            Severity::Info => notification.message.cyan(),
            Severity::Success => notification.message.green(),
            Severity::Error => notification.message.red(),
        };
        eprintln!("[{}] {}", notification.severity, message);
    }
}
