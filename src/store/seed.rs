//! Fixed sample tributes used to seed a fresh local store so the wall is
//! never empty on first load.

use chrono::{DateTime, Utc};

use crate::models::tribute::TributeEntry;

/// Pre-authored entries with stable ids "1".."20". Data, not behavior: the
/// local adapter writes this table verbatim on its first read.
const SEED_TABLE: &[(&str, &str, &str, &str)] = &[
    ("1", "Sarah M.", "Forever in our hearts, your courage inspires us daily", "2024-01-15T10:30:00Z"),
    ("2", "David K.", "Your strength and kindness touched so many lives", "2024-01-14T15:45:00Z"),
    ("3", "Emma L.", "Celebrating five years cancer-free, thank you for hope", "2024-01-13T09:20:00Z"),
    ("4", "Michael R.", "Dad, your love guides us through every challenge", "2024-01-12T14:10:00Z"),
    ("5", "Lisa T.", "Your laughter and light will never be forgotten", "2024-01-11T11:55:00Z"),
    ("6", "James W.", "Brother, your fight gave us all courage to keep going", "2024-01-10T16:30:00Z"),
    ("7", "Anna S.", "Mom, your wisdom and love live on in our hearts", "2024-01-09T08:45:00Z"),
    ("8", "Robert M.", "Your dedication to helping others continues to inspire", "2024-01-08T13:20:00Z"),
    ("9", "Grace H.", "Grandma, your stories and hugs are treasured memories", "2024-01-07T10:15:00Z"),
    ("10", "Thomas B.", "Your research work paved the way for future breakthroughs", "2024-01-06T17:40:00Z"),
    ("11", "Maria C.", "Your positive spirit lifted everyone around you", "2024-01-05T12:25:00Z"),
    ("12", "William D.", "Uncle, your jokes and warmth brightened every gathering", "2024-01-04T09:50:00Z"),
    ("13", "Helen F.", "Your teaching and mentorship shaped countless lives", "2024-01-03T14:35:00Z"),
    ("14", "Charles G.", "Your quiet strength was a beacon for our family", "2024-01-02T11:10:00Z"),
    ("15", "Dorothy I.", "Your garden and your love both continue to bloom", "2024-01-01T16:20:00Z"),
    ("16", "Frank J.", "Your service and sacrifice will always be honored", "2023-12-31T08:30:00Z"),
    ("17", "Betty K.", "Your recipes and traditions keep our family connected", "2023-12-30T13:45:00Z"),
    ("18", "George L.", "Your music and passion for life echo in our memories", "2023-12-29T10:55:00Z"),
    ("19", "Ruth N.", "Your volunteer work touched countless hearts in our community", "2023-12-28T15:15:00Z"),
    ("20", "Arthur P.", "Your stories of adventure inspire us to live fully", "2023-12-27T12:40:00Z"),
];

pub fn seed_entries() -> Vec<TributeEntry> {
    SEED_TABLE
        .iter()
        .map(|(id, name, message, created_at)| TributeEntry {
            id: (*id).to_string(),
            name: (*name).to_string(),
            message: (*message).to_string(),
            created_at: DateTime::parse_from_rfc3339(created_at)
                .expect("seed timestamp is valid RFC 3339")
                .with_timezone(&Utc),
        })
        .collect()
}
