//! Demo CLI (SPEC_FULL.md §6): builds a small in-memory repository and runs
//! [`generate_schedule`] against it. Testing-only surface, no flag here is
//! contractual.

use chrono::NaiveTime;
use clap::Parser;
use timetable_core::domain::{
    Batch, BatchId, Faculty, FacultyAssignment, FacultyId, Offering, OfferingId, Room, RoomType,
    Shift, Subject, SubjectCode, SubjectType, Timeslot, TimeslotId, RoomId,
};
use timetable_core::{generate_schedule, InMemoryRepository, SolverConfig};

#[derive(Parser, Debug)]
#[command(about = "Run the scheduler against a small built-in demo dataset")]
struct Cli {
    /// Name to give the generated schedule version.
    #[arg(long, default_value = "demo")]
    version_name: String,

    /// CP-SAT time limit in seconds.
    #[arg(long, default_value_t = 20)]
    time_limit_seconds: u32,

    /// CP-SAT worker thread count.
    #[arg(long, default_value_t = 8)]
    workers: u32,
}

fn demo_repository() -> InMemoryRepository {
    let mut repo = InMemoryRepository::default();

    repo.rooms.push(Room {
        id: RoomId(1),
        code: "A101".into(),
        capacity: 60,
        room_type: RoomType::Theory,
        location: Some("Block A".into()),
    });
    repo.rooms.push(Room {
        id: RoomId(2),
        code: "L201".into(),
        capacity: 30,
        room_type: RoomType::Lab,
        location: Some("Block L".into()),
    });

    for (i, (hour,)) in [(9,), (10,), (11,), (14,)].into_iter().enumerate() {
        repo.timeslots.push(Timeslot {
            id: TimeslotId(i as u64 + 1),
            day: 0,
            slot: i as u16 + 1,
            start_time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(hour + 1, 0, 0).unwrap(),
        });
    }

    repo.subjects.push(Subject {
        code: SubjectCode("CS201".into()),
        title: "Data Structures".into(),
        subject_type: SubjectType::Theory,
        classes_per_week: 2,
        duration_slots: 1,
    });
    repo.subjects.push(Subject {
        code: SubjectCode("CS202".into()),
        title: "Data Structures Lab".into(),
        subject_type: SubjectType::Lab,
        classes_per_week: 1,
        duration_slots: 1,
    });

    repo.batches.push(Batch {
        id: BatchId(1),
        name: "CSE-2A".into(),
        semester: 3,
        size: 45,
        shift: Shift::Day,
    });

    repo.offerings.push(Offering {
        id: OfferingId(1),
        subject_code: SubjectCode("CS201".into()),
        batch_id: BatchId(1),
        semester: 3,
        elective: false,
    });
    repo.offerings.push(Offering {
        id: OfferingId(2),
        subject_code: SubjectCode("CS202".into()),
        batch_id: BatchId(1),
        semester: 3,
        elective: false,
    });

    repo.faculty.push(Faculty {
        id: FacultyId(1),
        name: "Dr. Rao".into(),
    });

    repo.faculty_assignments.push(FacultyAssignment {
        id: 1,
        offering_id: OfferingId(1),
        faculty_id: FacultyId(1),
    });
    repo.faculty_assignments.push(FacultyAssignment {
        id: 2,
        offering_id: OfferingId(2),
        faculty_id: FacultyId(1),
    });

    repo
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut repo = demo_repository();
    let config = SolverConfig {
        time_limit_seconds: cli.time_limit_seconds,
        workers: cli.workers,
    };

    match generate_schedule(&mut repo, Some(&cli.version_name), config) {
        Ok(result) => {
            println!(
                "generated version {} with {} entries (status: {})",
                result.version_id, result.entries_count, result.solver_status
            );
            for entry in &result.sample_entries {
                println!(
                    "  offering={} faculty={} batch={} room={} day={} slot={}",
                    entry.offering_id,
                    entry.faculty_id,
                    entry.batch_id,
                    entry.room_id,
                    entry.day,
                    entry.slot
                );
            }
        }
        Err(err) => {
            eprintln!("generation failed: {err}");
            std::process::exit(1);
        }
    }
}
