// ABOUTME: Extraction prompt sent to the vision model
// ABOUTME: Describes the JSON contract the model must return for each workout variant
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Trainsheet

//! Extraction prompt for the vision analysis call. The JSON contract below
//! mirrors the shapes in [`crate::models`]; fields the model cannot read
//! from the images are omitted rather than guessed.

/// System-style extraction prompt prepended to every analysis request
pub const EXTRACTION_PROMPT: &str = r#"You are analyzing screenshots of a single workout session from a fitness tracker. All provided images belong to the same session. Extract the data into one JSON object and return ONLY that JSON, no prose.

The object must have this shape:

{
  "workoutType": "Strength" | "Run" | "Swim",
  "summary": {
    "date": "YYYY-MM-DD if visible",
    "durationMinutes": number,
    "totalCalories": number,
    "avgHeartRate": number,
    "maxHeartRate": number,
    "device": "device name if visible"
  },
  "details": { ... }
}

For "Strength", details is:
  { "exercises": [ { "name": string, "timeMinutes": number, "reps": number,
      "sets": number, "calories": number, "avgHeartRate": number,
      "maxHeartRate": number } ],
    "pauses": [ { "afterExercise": string, "durationMinutes": number } ] }

For "Run", details is:
  { "totalDistance": number (km), "estimatedFluidLoss": number (ml),
    "intervals": [ { "label": string, "type": string,
      "durationMinutes": number, "distance": number (km),
      "avgHeartRate": number } ] }

For "Swim", details is:
  { "activity": string, "totalDistance": number (meters),
    "pace": "m:ss per 100m", "strokeCount": number, "swolf": number }

Rules:
- Omit any field you cannot read from the images. Never invent values.
- Numbers are plain JSON numbers, no units in the value.
- If the images do not show a recognizable workout, return {"workoutType": null}.
"#;

/// Build the full text part for a request, appending user notes when present
#[must_use]
pub fn build_prompt(notes: Option<&str>) -> String {
    match notes {
        Some(notes) if !notes.trim().is_empty() => {
            format!("{EXTRACTION_PROMPT}\nUser notes about this session:\n{notes}")
        }
        _ => EXTRACTION_PROMPT.to_owned(),
    }
}
