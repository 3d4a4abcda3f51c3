//! CSV log of completed matches, one row per scored match.

use crate::combat::EndReason;
use crate::error::Result;
use crate::genome::{Gene, Genome};
use crate::robot::RobotId;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Everything logged about one completed match.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    pub generation: u32,
    /// 1-based position of the attacker within its generation.
    pub match_number: u32,
    pub robot: RobotId,
    pub genome: Genome,
    pub duration_secs: f32,
    pub fitness: i32,
    pub reason: EndReason,
    pub parents: Option<(RobotId, RobotId)>,
}

impl MatchRecord {
    pub fn header() -> String {
        let mut columns = vec!["generation", "match", "robot"];
        columns.extend(Gene::ALL.iter().map(|g| g.name()));
        columns.extend(["duration", "fitness", "end_reason", "left_parent", "right_parent"]);
        columns.join(",")
    }

    pub fn to_csv_row(&self) -> String {
        let (left, right) = self.parents.unwrap_or((RobotId(0), RobotId(0)));
        let mut fields = vec![
            self.generation.to_string(),
            self.match_number.to_string(),
            self.robot.to_string(),
        ];
        fields.extend(self.genome.genes().iter().map(|v| v.to_string()));
        fields.push(format!("{:.2}", self.duration_secs));
        fields.push(self.fitness.to_string());
        fields.push(self.reason.label().to_string());
        fields.push(left.to_string());
        fields.push(right.to_string());
        fields.join(",")
    }
}

/// Appends match records to any writer, header first.
pub struct MatchLedger<W: Write> {
    writer: W,
    rows: usize,
}

impl MatchLedger<BufWriter<File>> {
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        MatchLedger::new(BufWriter::new(File::create(path)?))
    }
}

impl<W: Write> MatchLedger<W> {
    pub fn new(mut writer: W) -> Result<Self> {
        writeln!(writer, "{}", MatchRecord::header())?;
        writer.flush()?;
        Ok(Self { writer, rows: 0 })
    }

    pub fn append(&mut self, record: &MatchRecord) -> Result<()> {
        writeln!(self.writer, "{}", record.to_csv_row())?;
        self.writer.flush()?;
        self.rows += 1;
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
