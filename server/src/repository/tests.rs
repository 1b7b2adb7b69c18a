//! Repository Integration Tests
//!
//! Tests for the SQLite repositories with an in-memory database.

#[cfg(test)]
mod tests {
    use crate::domain::*;
    use crate::repository::*;
    use chrono::{NaiveDate, TimeZone};
    use std::path::Path;

    fn setup_test_db() -> DbState {
        init_db(Path::new(":memory:")).expect("Failed to init test DB")
    }

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn sample_run(name: &str, status: &str) -> ProductionRun {
        ProductionRun {
            name: name.to_string(),
            target: 20,
            completed: 15,
            status: status.to_string(),
            start_date: date(2024, 2, 1),
            end_date: date(2024, 3, 31),
            personnel: vec!["Andi".into(), "Sari".into()],
            materials: vec![Material {
                name: "Kabel".into(),
                qty: 10,
                price: 2500.0,
                satuan: "m".into(),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    fn sample_overhaul(name: &str) -> Overhaul {
        Overhaul {
            name: name.to_string(),
            location: "Dipo Bandung".into(),
            status: "Proses".into(),
            estimate: date(2024, 8, 1),
            progress: 40,
            history: vec![
                HistoryEntry {
                    description: "Bongkar".into(),
                    ..Default::default()
                },
                HistoryEntry {
                    description: "Ganti bearing".into(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }

    fn sample_qc(department: Department) -> QualityCheck {
        QualityCheck {
            product_name: "Battery Pack".into(),
            batch_code: "B-01".into(),
            status: QC_PASSED.into(),
            tested_count: 8,
            passed_count: 1,
            date: date(2024, 4, 2),
            department: Some(department),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_inventory_crud() {
        let repo = InventoryRepository::new(setup_test_db().conn);

        let created = repo
            .create(&InventoryItem::new("Relay", 10, "Gudang A", "Tersedia", "INV-001"))
            .await
            .expect("Failed to create");
        assert!(created.id > 0);

        let mut item = repo.find_by_id(created.id).await.unwrap().expect("missing item");
        assert_eq!(item.name, "Relay");

        item.quantity = 4;
        repo.update(&item).await.expect("Update failed");
        assert_eq!(repo.find_by_id(item.id).await.unwrap().unwrap().quantity, 4);

        repo.delete(item.id).await.expect("Delete failed");
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_ids_are_not_found() {
        let repo = InventoryRepository::new(setup_test_db().conn);
        let mut ghost = InventoryItem::new("Ghost", 1, "-", "-", "-");
        ghost.id = 99;

        assert!(matches!(repo.update(&ghost).await, Err(DomainError::NotFound(_))));
        assert!(matches!(repo.delete(99).await, Err(DomainError::NotFound(_))));
        assert!(repo.find_by_id(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_production_json_columns_roundtrip() {
        let repo = ProductionRepository::new(setup_test_db().conn);
        let created = repo.create(&sample_run("Radio Lokomotif", "Proses")).await.unwrap();

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.personnel, vec!["Andi", "Sari"]);
        assert_eq!(found.materials.len(), 1);
        assert_eq!(found.materials[0].price, 2500.0);
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_overhaul_history_is_stamped_and_replaced() {
        let repo = OverhaulRepository::new(setup_test_db().conn);
        let created = repo.create(&sample_overhaul("Point Machine")).await.unwrap();
        assert_eq!(created.history.len(), 2);
        assert!(created.history.iter().all(|h| h.timestamp.is_some()));

        let mut edited = created.clone();
        edited.history.truncate(1);
        edited.progress = 80;
        repo.update(&edited).await.unwrap();

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.progress, 80);
        assert_eq!(found.history.len(), 1);
        assert_eq!(found.history[0].description, "Bongkar");
    }

    #[tokio::test]
    async fn test_overhaul_delete_cascades_history() {
        let db = setup_test_db();
        let repo = OverhaulRepository::new(db.conn.clone());
        let created = repo.create(&sample_overhaul("Gearbox")).await.unwrap();
        repo.delete(created.id).await.unwrap();

        let conn = db.conn.lock().await;
        let remaining: i64 = conn
            .query_row("SELECT COUNT(*) FROM overhaul_history", [], |row| row.get(0))
            .unwrap();
        assert_eq!(remaining, 0);
    }

    #[tokio::test]
    async fn test_calibration_last_update_is_set() {
        let repo = CalibrationRepository::new(setup_test_db().conn);
        let created = repo
            .create(&Calibration {
                name: "Multimeter".into(),
                status: "Proses".into(),
                progress: 2,
                due_date: date(2024, 6, 1),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(created.last_update.is_some());

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.last_update, created.last_update);
    }

    #[tokio::test]
    async fn test_assign_profile() {
        let db = setup_test_db();
        let people = PersonnelRepository::new(db.conn.clone());
        let profiles = ProfileRepository::new(db.conn.clone());

        let person = people
            .create(&Personnel {
                nip: "1987".into(),
                jabatan: "Teknisi".into(),
                divisi: "Produksi".into(),
                status: "Aktif".into(),
                join_date: date(2020, 2, 1),
                phone_number: "0812".into(),
                urgent_number: "0813".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        let profile = profiles
            .create(&Profile {
                email: "andi@example.com".into(),
                address: "Bandung".into(),
                phone_number: "0812".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        let linked = people.assign_profile(person.id, Some(profile.id)).await.unwrap();
        assert_eq!(linked.profile_id, Some(profile.id));

        let err = people.assign_profile(person.id, Some(404)).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
        assert!(matches!(
            people.assign_profile(999, None).await,
            Err(DomainError::NotFound(_))
        ));

        // Deleting the profile unlinks it
        profiles.delete(profile.id).await.unwrap();
        let person = people.find_by_id(person.id).await.unwrap().unwrap();
        assert_eq!(person.profile_id, None);
    }

    #[tokio::test]
    async fn test_profile_sections_roundtrip() {
        let repo = ProfileRepository::new(setup_test_db().conn);
        let created = repo
            .create(&Profile {
                email: "sari@example.com".into(),
                address: "Madiun".into(),
                phone_number: "0857".into(),
                education: Some(Education {
                    degree: "S1".into(),
                    university: "ITS".into(),
                    year: "2016".into(),
                }),
                experience: None,
                ..Default::default()
            })
            .await
            .unwrap();

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.education.map(|e| e.university), Some("ITS".to_string()));
        assert!(found.experience.is_none());
    }

    #[tokio::test]
    async fn test_engineering_team_roundtrip() {
        let repo = EngineeringRepository::new(setup_test_db().conn);
        let created = repo
            .create(&EngineeringProject {
                name: "Signal System".into(),
                status: "Desain".into(),
                team: vec!["Andi".into(), "Budi".into()],
                deadline: date(2024, 12, 1),
                progress: 10,
                ..Default::default()
            })
            .await
            .unwrap();

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.team, vec!["Andi", "Budi"]);
    }

    #[tokio::test]
    async fn test_stock_timestamp_is_server_assigned() {
        let repo = StockRepository::new(setup_test_db().conn);
        let stale = chrono::Utc.with_ymd_and_hms(1999, 1, 1, 0, 0, 0).unwrap();
        let created = repo
            .create(&StockEntry {
                item_name: "Relay".into(),
                quantity: 0,
                location: "Rak 1".into(),
                status: "Kosong".into(),
                last_update: Some(stale),
                ..Default::default()
            })
            .await
            .unwrap();
        let stamped = created.last_update.expect("timestamp assigned");
        assert!(stamped > stale);

        let updated = repo
            .update(&StockEntry {
                quantity: 3,
                last_update: Some(stale),
                ..created.clone()
            })
            .await
            .unwrap();
        let refreshed = updated.last_update.expect("timestamp assigned");
        assert!(refreshed >= stamped);

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert!(found.last_update.expect("timestamp stored") > stale);
    }

    #[tokio::test]
    async fn test_qc_code_and_pass_rate() {
        let repo = QualityRepository::new(setup_test_db().conn);
        let created = repo.create(&sample_qc(Department::Kalibrasi)).await.unwrap();

        assert_eq!(created.code, format!("KAL-{}", created.qc_id));
        assert_eq!(created.pass_rate, 13);

        let found = repo.find_by_code(&created.code).await.unwrap();
        assert_eq!(found.qc_id, created.qc_id);
        assert!(matches!(
            repo.find_by_code(&format!("OVH-{}", created.qc_id)).await,
            Err(DomainError::NotFound(_))
        ));
        assert!(matches!(repo.find_by_code("nonsense").await, Err(DomainError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_qc_listing_includes_derived_entries() {
        let db = setup_test_db();
        let qc = QualityRepository::new(db.conn.clone());
        let runs = ProductionRepository::new(db.conn.clone());
        let overhauls = OverhaulRepository::new(db.conn.clone());

        qc.create(&sample_qc(Department::Rekayasa)).await.unwrap();
        let run = runs.create(&sample_run("Way Station", PRODUCTION_DONE)).await.unwrap();
        overhauls.create(&sample_overhaul("Point Machine")).await.unwrap();

        let all = qc.list_with_derived().await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].source, QcSource::Qc);

        let derived = all.iter().find(|e| e.source == QcSource::Produksi).unwrap();
        assert_eq!(derived.status, QC_PASSED);
        assert_eq!(derived.batch_code, format!("BATCH-2024-{}", run.id));
        assert_eq!(derived.pass_rate, 75);

        let from_overhaul = all.iter().find(|e| e.source == QcSource::Overhaul).unwrap();
        assert_eq!(from_overhaul.tested_count, 100);
        assert_eq!(from_overhaul.passed_count, 40);

        // Plain listing stays limited to stored entries
        assert_eq!(qc.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_qc_code_links_production_run() {
        let db = setup_test_db();
        let qc = QualityRepository::new(db.conn.clone());
        let runs = ProductionRepository::new(db.conn.clone());
        let run = runs.create(&sample_run("Sentranik", "Proses")).await.unwrap();

        let mut entry = sample_qc(Department::Production);
        entry.code = format!("PRD-{}", run.id);
        let created = qc.create(&entry).await.unwrap();
        assert_eq!(created.produksi_id, Some(run.id));

        entry.code = "PRD-999".into();
        let unlinked = qc.create(&entry).await.unwrap();
        assert_eq!(unlinked.produksi_id, None);
    }
}
