//! Built-in exercises used when no catalog file can be read

use super::ExerciseRecord;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub(super) fn exercises() -> Vec<ExerciseRecord> {
    vec![
        ExerciseRecord {
            name: "Bodyweight Squat".to_string(),
            description: "Basic squat exercise targeting lower body".to_string(),
            instructions: strings(&[
                "Stand with feet shoulder-width apart",
                "Lower by bending knees and pushing hips back",
                "Return to standing position",
            ]),
            tips: strings(&["Keep chest up", "Don't let knees cave inward"]),
            muscles_worked: strings(&["Quadriceps", "Glutes", "Hamstrings"]),
            equipment: "bodyweight".to_string(),
            focus_area: "lower".to_string(),
            duration_secs: 45,
        },
        ExerciseRecord {
            name: "Push-Up".to_string(),
            description: "Upper body exercise targeting chest and arms".to_string(),
            instructions: strings(&[
                "Start in plank position",
                "Lower chest to ground",
                "Push back up",
            ]),
            tips: strings(&["Keep body straight", "Don't let hips sag"]),
            muscles_worked: strings(&["Chest", "Shoulders", "Triceps"]),
            equipment: "bodyweight".to_string(),
            focus_area: "upper".to_string(),
            duration_secs: 30,
        },
        ExerciseRecord {
            name: "Plank".to_string(),
            description: "Core stability exercise".to_string(),
            instructions: strings(&[
                "Hold plank position",
                "Keep body straight",
                "Breathe steadily",
            ]),
            tips: strings(&["Don't let hips drop", "Keep core tight"]),
            muscles_worked: strings(&["Core", "Shoulders"]),
            equipment: "bodyweight".to_string(),
            focus_area: "core".to_string(),
            duration_secs: 60,
        },
        ExerciseRecord {
            name: "Jumping Jacks".to_string(),
            description: "Full body cardio exercise".to_string(),
            instructions: strings(&[
                "Start with feet together",
                "Jump while spreading legs",
                "Return to start position",
            ]),
            tips: strings(&["Land softly", "Keep core engaged"]),
            muscles_worked: strings(&["Calves", "Shoulders", "Core"]),
            equipment: "bodyweight".to_string(),
            focus_area: "full_body".to_string(),
            duration_secs: 30,
        },
    ]
}
