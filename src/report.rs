use std::fmt::Write;
use std::path::Path;

use chrono::NaiveDate;

use crate::error::ClassroomError;
use crate::lesson;
use crate::models::{Classification, MenuItem, Reflection, TokenCount};

const BAR_WIDTH: usize = 40;

pub fn no_store_message(path: &Path) -> String {
    format!(
        "{} 파일을 찾을 수 없습니다. 먼저 생각을 제출하여 파일을 생성하세요.",
        path.display()
    )
}

pub fn empty_store_message(path: &Path) -> String {
    format!("{} 파일이 비어 있습니다. 먼저 생각을 제출해주세요.", path.display())
}

pub fn banner(err: &ClassroomError) -> String {
    if err.is_validation() {
        format!("[경고] {err}")
    } else {
        format!("[오류] {err}")
    }
}

pub fn render_tips(item: MenuItem) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "## 팁");
    for tip in lesson::tips(item) {
        let _ = writeln!(output, "- {}: {}", tip.heading, tip.body);
    }
    output
}

pub fn render_classification(result: &Classification) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "식물 건강 상태: {}", result.category);
    if let Some(mean) = result.mean {
        let _ = writeln!(output, "평균 밝기: {mean:.1}");
    }
    let _ = writeln!(output, "필요한 조건: {}", result.advice);
    output
}

/// Horizontal bar chart scaled so the most frequent token fills the bar.
pub fn render_chart(ranked: &[TokenCount]) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "학생 생각에서 자주 등장한 단어");

    let Some(max) = ranked.iter().map(|t| t.count).max() else {
        return output;
    };
    let label_width = ranked
        .iter()
        .map(|t| t.token.chars().count())
        .max()
        .unwrap_or(0);

    for entry in ranked {
        let filled = (entry.count * BAR_WIDTH).div_ceil(max.max(1));
        let padding = label_width - entry.token.chars().count();
        let _ = writeln!(
            output,
            "{}{} │{} {}",
            entry.token,
            " ".repeat(padding),
            "█".repeat(filled),
            entry.count
        );
    }
    let _ = writeln!(output, "(단어 / 빈도)");
    output
}

pub fn render_submissions(reflections: &[Reflection]) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "## 제출된 생각 ({}개)", reflections.len());

    if reflections.is_empty() {
        let _ = writeln!(output, "아직 제출된 생각이 없습니다.");
        return output;
    }

    for (index, reflection) in reflections.iter().enumerate() {
        let _ = writeln!(
            output,
            "{}. {}: {}",
            index + 1,
            reflection.display_author(),
            reflection.comment.trim_end()
        );
    }
    output
}

pub fn build_mining_report(
    generated_on: NaiveDate,
    reflections: &[Reflection],
    ranked: &[TokenCount],
) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# 학생들의 생각 분석");
    let _ = writeln!(
        output,
        "Generated on {} from {} reflections",
        generated_on,
        reflections.len()
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Top Words");

    if ranked.is_empty() {
        let _ = writeln!(output, "No words recorded yet.");
    } else {
        let _ = writeln!(output, "| rank | word | count |");
        let _ = writeln!(output, "|---:|---|---:|");
        for (rank, entry) in ranked.iter().enumerate() {
            let _ = writeln!(output, "| {} | {} | {} |", rank + 1, entry.token, entry.count);
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Recent Reflections");

    if reflections.is_empty() {
        let _ = writeln!(output, "No reflections submitted yet.");
    } else {
        for reflection in reflections.iter().rev().take(5) {
            let _ = writeln!(
                output,
                "- {}: {}",
                reflection.display_author(),
                reflection.comment.trim_end()
            );
        }
    }

    output
}

pub fn export_csv<W: std::io::Write>(reflections: &[Reflection], out: W) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for reflection in reflections {
        writer.serialize(reflection)?;
    }
    writer.flush()?;
    Ok(())
}
