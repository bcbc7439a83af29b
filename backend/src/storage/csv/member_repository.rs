use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use csv::{Reader, Writer};
use log::warn;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::sync::Arc;

use super::connection::CsvConnection;
use crate::domain::models::member::{Child, Member, RelationshipStatus, Spouse};
use crate::storage::traits::MemberStorage;

/// CSV-based member repository.
///
/// Members, spouses, and children live in separate files keyed by member ID
/// and are joined on read. Every mutation rewrites the affected files
/// atomically.
#[derive(Clone)]
pub struct MemberRepository {
    connection: Arc<CsvConnection>,
}

impl MemberRepository {
    /// Create a new CSV member repository
    pub fn new(connection: Arc<CsvConnection>) -> Self {
        Self { connection }
    }

    /// Read all members with spouse and children records joined in,
    /// ordered by name
    fn read_all(&self) -> Result<Vec<Member>> {
        let mut members = self.read_member_rows()?;
        let spouses = self.read_spouse_rows()?;
        let children = self.read_child_rows()?;

        for member in &mut members {
            member.spouse = spouses
                .iter()
                .find(|(member_id, _)| member_id == &member.id)
                .map(|(_, spouse)| spouse.clone());

            member.children = children
                .iter()
                .filter(|(member_id, _)| member_id == &member.id)
                .map(|(_, child)| child.clone())
                .collect();
            member.children.sort_by_key(|child| child.child_order);
        }

        members.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(members)
    }

    fn read_member_rows(&self) -> Result<Vec<Member>> {
        let file_path = self.connection.members_file_path();
        if !file_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&file_path)
            .with_context(|| format!("Failed to open {}", file_path.display()))?;
        let mut csv_reader = Reader::from_reader(BufReader::new(file));

        let mut members = Vec::new();
        for result in csv_reader.records() {
            let record = result?;

            let id = record.get(0).unwrap_or("").to_string();
            if id.is_empty() {
                warn!("Skipping member row without an ID");
                continue;
            }

            members.push(Member {
                id,
                full_name: record.get(1).unwrap_or("").to_string(),
                date_of_birth: Self::parse_optional_date(record.get(2).unwrap_or("")),
                email: Self::optional_field(record.get(3)),
                phone: Self::optional_field(record.get(4)),
                nationality: Self::optional_field(record.get(5)),
                relationship_status: Self::parse_status(record.get(6).unwrap_or("")),
                currently_employed: record.get(7).unwrap_or("false") == "true",
                completed_tertiary: record.get(8).unwrap_or("false") == "true",
                created_at: Self::parse_timestamp(record.get(9).unwrap_or("")),
                updated_at: Self::parse_timestamp(record.get(10).unwrap_or("")),
                spouse: None,
                children: Vec::new(),
            });
        }

        Ok(members)
    }

    fn read_spouse_rows(&self) -> Result<Vec<(String, Spouse)>> {
        let file_path = self.connection.spouses_file_path();
        if !file_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&file_path)
            .with_context(|| format!("Failed to open {}", file_path.display()))?;
        let mut csv_reader = Reader::from_reader(BufReader::new(file));

        let mut spouses = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            let member_id = record.get(0).unwrap_or("").to_string();
            if member_id.is_empty() {
                warn!("Skipping spouse row without a member ID");
                continue;
            }
            spouses.push((
                member_id,
                Spouse {
                    full_name: record.get(1).unwrap_or("").to_string(),
                    date_of_birth: Self::parse_optional_date(record.get(2).unwrap_or("")),
                    marriage_anniversary_date: Self::parse_optional_date(
                        record.get(3).unwrap_or(""),
                    ),
                },
            ));
        }

        Ok(spouses)
    }

    fn read_child_rows(&self) -> Result<Vec<(String, Child)>> {
        let file_path = self.connection.children_file_path();
        if !file_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&file_path)
            .with_context(|| format!("Failed to open {}", file_path.display()))?;
        let mut csv_reader = Reader::from_reader(BufReader::new(file));

        let mut children = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            let member_id = record.get(0).unwrap_or("").to_string();
            if member_id.is_empty() {
                warn!("Skipping child row without a member ID");
                continue;
            }
            children.push((
                member_id,
                Child {
                    full_name: record.get(1).unwrap_or("").to_string(),
                    date_of_birth: Self::parse_optional_date(record.get(2).unwrap_or("")),
                    child_order: record.get(3).unwrap_or("0").parse::<u32>().unwrap_or(0),
                },
            ));
        }

        Ok(children)
    }

    /// Write all members (and their family rows) back to the three CSV files
    fn write_all(&self, members: &[Member]) -> Result<()> {
        self.write_members_file(members)?;
        self.write_spouses_file(members)?;
        self.write_children_file(members)?;
        Ok(())
    }

    fn write_members_file(&self, members: &[Member]) -> Result<()> {
        let file_path = self.connection.members_file_path();
        let temp_path = file_path.with_extension("tmp");
        {
            let file = File::create(&temp_path)?;
            let mut csv_writer = Writer::from_writer(BufWriter::new(file));

            csv_writer.write_record([
                "id",
                "full_name",
                "date_of_birth",
                "email",
                "phone",
                "nationality",
                "relationship_status",
                "currently_employed",
                "completed_tertiary",
                "created_at",
                "updated_at",
            ])?;

            for member in members {
                csv_writer.write_record([
                    member.id.as_str(),
                    member.full_name.as_str(),
                    Self::format_optional_date(member.date_of_birth).as_str(),
                    member.email.as_deref().unwrap_or(""),
                    member.phone.as_deref().unwrap_or(""),
                    member.nationality.as_deref().unwrap_or(""),
                    member.relationship_status.as_str(),
                    if member.currently_employed { "true" } else { "false" },
                    if member.completed_tertiary { "true" } else { "false" },
                    member.created_at.to_rfc3339().as_str(),
                    member.updated_at.to_rfc3339().as_str(),
                ])?;
            }

            csv_writer.flush()?;
        }
        fs::rename(&temp_path, &file_path)?;
        Ok(())
    }

    fn write_spouses_file(&self, members: &[Member]) -> Result<()> {
        let file_path = self.connection.spouses_file_path();
        let temp_path = file_path.with_extension("tmp");
        {
            let file = File::create(&temp_path)?;
            let mut csv_writer = Writer::from_writer(BufWriter::new(file));

            csv_writer.write_record([
                "member_id",
                "full_name",
                "date_of_birth",
                "marriage_anniversary_date",
            ])?;

            for member in members {
                if let Some(spouse) = &member.spouse {
                    csv_writer.write_record([
                        member.id.as_str(),
                        spouse.full_name.as_str(),
                        Self::format_optional_date(spouse.date_of_birth).as_str(),
                        Self::format_optional_date(spouse.marriage_anniversary_date).as_str(),
                    ])?;
                }
            }

            csv_writer.flush()?;
        }
        fs::rename(&temp_path, &file_path)?;
        Ok(())
    }

    fn write_children_file(&self, members: &[Member]) -> Result<()> {
        let file_path = self.connection.children_file_path();
        let temp_path = file_path.with_extension("tmp");
        {
            let file = File::create(&temp_path)?;
            let mut csv_writer = Writer::from_writer(BufWriter::new(file));

            csv_writer.write_record(["member_id", "full_name", "date_of_birth", "child_order"])?;

            for member in members {
                for child in &member.children {
                    csv_writer.write_record([
                        member.id.as_str(),
                        child.full_name.as_str(),
                        Self::format_optional_date(child.date_of_birth).as_str(),
                        child.child_order.to_string().as_str(),
                    ])?;
                }
            }

            csv_writer.flush()?;
        }
        fs::rename(&temp_path, &file_path)?;
        Ok(())
    }

    fn optional_field(value: Option<&str>) -> Option<String> {
        match value {
            Some("") | None => None,
            Some(v) => Some(v.to_string()),
        }
    }

    /// Blank means "never recorded"; a value that fails to parse is treated
    /// the same way so one bad row cannot poison the data set
    fn parse_optional_date(value: &str) -> Option<NaiveDate> {
        if value.is_empty() {
            return None;
        }
        match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                warn!("Failed to parse date '{}', treating as absent", value);
                None
            }
        }
    }

    fn format_optional_date(date: Option<NaiveDate>) -> String {
        date.map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }

    fn parse_status(value: &str) -> RelationshipStatus {
        match RelationshipStatus::parse(value) {
            Some(status) => status,
            None => {
                if !value.is_empty() {
                    warn!("Unknown relationship status '{}', defaulting to Single", value);
                }
                RelationshipStatus::default()
            }
        }
    }

    fn parse_timestamp(value: &str) -> DateTime<Utc> {
        match DateTime::parse_from_rfc3339(value) {
            Ok(ts) => ts.with_timezone(&Utc),
            Err(_) => {
                warn!("Failed to parse timestamp '{}', using current time", value);
                Utc::now()
            }
        }
    }
}

impl MemberStorage for MemberRepository {
    fn store_member(&self, member: &Member) -> Result<()> {
        let mut members = self.read_all()?;

        if members.iter().any(|m| m.id == member.id) {
            return Err(anyhow::anyhow!("Member already exists: {}", member.id));
        }

        members.push(member.clone());
        self.write_all(&members)
    }

    fn get_member(&self, member_id: &str) -> Result<Option<Member>> {
        let members = self.read_all()?;
        Ok(members.into_iter().find(|m| m.id == member_id))
    }

    fn list_members(&self) -> Result<Vec<Member>> {
        self.read_all()
    }

    fn update_member(&self, member: &Member) -> Result<()> {
        let mut members = self.read_all()?;

        let position = members
            .iter()
            .position(|m| m.id == member.id)
            .ok_or_else(|| anyhow::anyhow!("Member not found: {}", member.id))?;

        members[position] = member.clone();
        self.write_all(&members)
    }

    fn delete_member(&self, member_id: &str) -> Result<()> {
        let mut members = self.read_all()?;

        let before = members.len();
        members.retain(|m| m.id != member_id);
        if members.len() == before {
            return Err(anyhow::anyhow!("Member not found: {}", member_id));
        }

        self.write_all(&members)
    }
}
