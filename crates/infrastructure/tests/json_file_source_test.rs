use chrono::Duration;
use schedule_dns_application::ports::ScheduleSource;
use schedule_dns_domain::config::ScheduleConfig;
use schedule_dns_domain::LoadError;
use schedule_dns_infrastructure::schedule::JsonFileScheduleSource;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_json(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_loads_talk_catalog() {
    let file = write_json(
        r#"{
            "t1": { "start": "2025-09-13T10:10:00+05:30", "title": "Intro", "track": "Track 1" },
            "t2": {
                "start": "2025-09-13T10:10:00+05:30",
                "duration_minutes": 45,
                "title": "Typing",
                "speakers": ["Guido"],
                "track": "Track 2"
            }
        }"#,
    );
    let source = JsonFileScheduleSource::new(file.path(), Duration::minutes(30));

    let mut talks = source.load_talks().unwrap();
    talks.sort_by(|a, b| a.id.cmp(&b.id));

    assert_eq!(talks.len(), 2);
    assert_eq!(talks[0].duration, Duration::minutes(30));
    assert_eq!(talks[1].duration, Duration::minutes(45));
    assert_eq!(talks[1].speakers, vec!["Guido".to_string()]);
}

#[test]
fn test_loads_conference_export_with_room_as_track() {
    let file = write_json(
        r#"{
            "schedule": {
                "conference": {
                    "days": [
                        {
                            "rooms": {
                                "Track 1": [
                                    {
                                        "guid": "a1",
                                        "date": "2025-09-13T10:10:00+05:30",
                                        "title": "Intro",
                                        "duration": "00:40",
                                        "persons": [{ "public_name": "Ada" }]
                                    }
                                ]
                            }
                        },
                        { "rooms": {} }
                    ]
                }
            }
        }"#,
    );
    let config = ScheduleConfig {
        path: file.path().display().to_string(),
        slot_minutes: 30,
    };
    let source = JsonFileScheduleSource::from_config(&config);

    let talks = source.load_talks().unwrap();

    assert_eq!(talks.len(), 1);
    assert_eq!(&*talks[0].track, "Track 1");
    assert_eq!(talks[0].duration, Duration::minutes(40));
    assert_eq!(source.describe(), config.path);
}

#[test]
fn test_missing_file_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let source = JsonFileScheduleSource::new(&path, Duration::minutes(30));

    let result = source.load_talks();

    assert!(matches!(result, Err(LoadError::Read { path: p, .. }) if p == path.display().to_string()));
}

#[test]
fn test_invalid_json_is_malformed() {
    let file = write_json("{ not json");
    let source = JsonFileScheduleSource::new(file.path(), Duration::minutes(30));

    assert!(matches!(source.load_talks(), Err(LoadError::Malformed(_))));
}

#[test]
fn test_missing_field_names_the_talk() {
    let file = write_json(r#"{ "t9": { "start": "2025-09-13T10:10:00+05:30", "track": "Track 1" } }"#);
    let source = JsonFileScheduleSource::new(file.path(), Duration::minutes(30));

    assert_eq!(
        source.load_talks().unwrap_err(),
        LoadError::MissingField {
            talk: "t9".to_string(),
            field: "title"
        }
    );
}
