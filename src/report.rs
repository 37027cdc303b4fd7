use crate::check::{CheckSnapshot, Outcome};
use serde_json::{json, Value};

/// One line per participant, aligned on the login column.
pub fn render_text(snapshot: &CheckSnapshot) -> String {
    let width = snapshot
        .entries
        .iter()
        .map(|e| e.login.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = format!(
        "{} ({} .. {})\n",
        snapshot.window.date_str(),
        snapshot.window.start_rfc3339(),
        snapshot.window.end_rfc3339()
    );
    for entry in &snapshot.entries {
        let (mark, text) = match &entry.outcome {
            Outcome::Committed(true) => ("+", "committed today".to_string()),
            Outcome::Committed(false) => ("-", "no commit yet".to_string()),
            Outcome::Failed(e) => ("!", format!("error: {e}")),
        };
        out.push_str(&format!("{mark} {:<width$}  {text}\n", entry.login));
    }
    out.push_str(&format!(
        "{}/{} committed",
        snapshot.committed_count(),
        snapshot.entries.len()
    ));
    if snapshot.error_count() > 0 {
        out.push_str(&format!(", {} errors", snapshot.error_count()));
    }
    out.push('\n');
    out
}

pub fn to_json(snapshot: &CheckSnapshot) -> Value {
    let participants: Vec<Value> = snapshot
        .entries
        .iter()
        .map(|e| match &e.outcome {
            Outcome::Committed(b) => json!({ "login": e.login, "committed": b }),
            Outcome::Failed(err) => json!({ "login": e.login, "error": err.to_string() }),
        })
        .collect();

    json!({
        "date": snapshot.window.date_str(),
        "from": snapshot.window.start_rfc3339(),
        "to": snapshot.window.end_rfc3339(),
        "started_at": snapshot.started_at.to_rfc3339(),
        "checked_at": snapshot.finished_at.to_rfc3339(),
        "participants": participants,
    })
}
