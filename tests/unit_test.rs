// Unit tests for driver-manager
// These tests work with the public API without modifying the main codebase

#[cfg(test)]
mod search_tests {
    use driver_manager::search::{filter_records, matches, normalize};
    use driver_manager::source::{DriverRecord, seed_drivers};

    #[test]
    fn test_every_result_matches_and_nothing_is_dropped() {
        let drivers = seed_drivers();
        for term in ["ar", "MARÍA", "1122", "z", "nobody"] {
            let hits = filter_records(&drivers, term);
            let needle = normalize(term);
            assert!(hits.iter().all(|d| matches(d, &needle)), "term {term}");
            let expected = drivers.iter().filter(|d| matches(d, &needle)).count();
            assert_eq!(hits.len(), expected, "term {term}");
        }
    }

    #[test]
    fn test_identification_substring() {
        let drivers = vec![
            DriverRecord::new(1, "Ana", "AB12CD"),
            DriverRecord::new(2, "Luis", "XY99"),
        ];
        let hits = filter_records(&drivers, "b12c");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);
    }
}

#[cfg(test)]
mod store_tests {
    use driver_manager::error::{Result, StoreError, simple_error};
    use driver_manager::form::{DriverForm, FormField};
    use driver_manager::source::{DriverRecord, DriverSource, FixtureSource};
    use driver_manager::store::{
        Completion, DriverStatistics, DriverStore, Latency, PageCursor, next_id,
    };
    use std::time::{Duration, Instant};

    fn seed() -> Vec<DriverRecord> {
        vec![
            DriverRecord::new(1, "Carlos Mendoza", "12345678"),
            DriverRecord::new(2, "María García", "87654321"),
        ]
    }

    fn numbered(n: u32) -> Vec<DriverRecord> {
        (1..=n)
            .map(|i| DriverRecord::new(i, format!("Driver {i}"), format!("ID{i:04}")))
            .collect()
    }

    fn settle(store: &mut DriverStore) -> Vec<Completion> {
        store.poll(Instant::now())
    }

    struct Offline;

    impl DriverSource for Offline {
        fn fetch_drivers(&self) -> Result<Vec<DriverRecord>> {
            Err(simple_error("offline"))
        }

        fn describe(&self) -> String {
            "offline".into()
        }
    }

    #[test]
    fn test_new_store_loads_fixture_after_latency() {
        let t0 = Instant::now();
        let mut store = DriverStore::new(Box::new(FixtureSource::new()), Latency::default());
        assert!(store.is_loading());
        assert!(store.records().is_empty());
        assert!(store.poll(t0).is_empty());
        let done = store.poll(t0 + Duration::from_secs(1));
        assert_eq!(done, vec![Completion::Loaded { count: 3 }]);
        assert!(!store.is_loading());
        assert_eq!(store.records().len(), 3);
    }

    #[test]
    fn test_load_failure_clears_flag_and_keeps_list_empty() {
        let mut store = DriverStore::new(Box::new(Offline), Latency::none());
        let done = settle(&mut store);
        assert!(matches!(done.as_slice(), [Completion::LoadFailed { .. }]));
        assert!(!store.is_loading());
        assert!(store.records().is_empty());
    }

    #[test]
    fn test_search_reject_duplicate_then_delete() {
        let mut store = DriverStore::with_records(seed(), Latency::none());

        store.set_search_term("garcía");
        let filtered = store.filtered_records();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 2);
        store.set_search_term("");

        store.open_create_modal();
        store.update_form_data(FormField::Name, "Someone Else");
        store.update_form_data(FormField::Identification, "12345678");
        let err = store.save_driver().unwrap_err();
        assert_eq!(
            err,
            StoreError::DuplicateIdentification {
                identification: "12345678".into()
            }
        );
        assert_eq!(err.to_string(), "A driver with this identification already exists");
        assert_eq!(store.records(), seed().as_slice());
        assert!(store.is_dialog_open());
        assert!(!store.is_saving());
        store.close_modal();

        let target = store.find(1).cloned().unwrap();
        store.open_delete_modal(&target);
        assert!(store.confirm_delete_driver());
        settle(&mut store);
        assert_eq!(store.records(), &[DriverRecord::new(2, "María García", "87654321")]);
        assert!(!store.is_delete_modal_open());
        assert!(store.delete_target().is_none());
    }

    #[test]
    fn test_blank_fields_rejected() {
        let mut store = DriverStore::with_records(numbered(1), Latency::none());
        store.open_create_modal();
        store.update_form_data(FormField::Name, "   ");
        store.update_form_data(FormField::Identification, "ABCD");
        assert_eq!(store.save_driver(), Err(StoreError::MissingFields));
        assert!(store.is_dialog_open());
    }

    #[test]
    fn test_created_id_is_one_past_max_and_fields_trimmed() {
        let mut records = numbered(3);
        records.remove(1);
        assert_eq!(next_id(&records), Some(4));
        assert_eq!(next_id(&[]), Some(1));

        let mut store = DriverStore::with_records(records, Latency::none());
        store.open_create_modal();
        store.update_form_data(FormField::Name, " New Driver ");
        store.update_form_data(FormField::Identification, " NEW1 ");
        store.save_driver().unwrap();
        assert!(store.is_saving());
        let done = settle(&mut store);
        assert_eq!(done, vec![Completion::Created(DriverRecord::new(4, "New Driver", "NEW1"))]);
        assert!(!store.is_dialog_open());
        assert_eq!(store.form(), &DriverForm::default());
    }

    #[test]
    fn test_create_on_empty_list_starts_at_one() {
        let mut store = DriverStore::with_records(vec![], Latency::none());
        store.open_create_modal();
        store.update_form_data(FormField::Name, "First");
        store.update_form_data(FormField::Identification, "0001");
        store.save_driver().unwrap();
        settle(&mut store);
        assert_eq!(store.records()[0].id, 1);
    }

    #[test]
    fn test_create_refused_when_max_id_is_taken() {
        let top = DriverRecord::new(u32::MAX, "Last Id", "MAX1");
        assert_eq!(next_id(std::slice::from_ref(&top)), None);

        let mut store = DriverStore::with_records(vec![top.clone()], Latency::none());
        store.open_create_modal();
        store.update_form_data(FormField::Name, "One More");
        store.update_form_data(FormField::Identification, "MORE1");
        assert_eq!(store.save_driver(), Err(StoreError::IdsExhausted));
        assert!(store.is_dialog_open());
        assert!(!store.is_saving());
        assert!(settle(&mut store).is_empty());
        assert_eq!(store.records(), std::slice::from_ref(&top));

        // editing the record that holds the max id still works
        store.close_modal();
        store.open_edit_modal(&top);
        store.update_form_data(FormField::Name, "Renamed");
        store.save_driver().unwrap();
        settle(&mut store);
        assert_eq!(store.find(u32::MAX).map(|d| d.name.as_str()), Some("Renamed"));
    }

    #[test]
    fn test_edit_keeps_own_identification_and_position() {
        let mut store = DriverStore::with_records(seed(), Latency::none());
        let carlos = store.find(1).cloned().unwrap();
        store.open_edit_modal(&carlos);
        assert_eq!(store.form().identification, "12345678");
        assert_eq!(store.editing(), Some(&carlos));

        store.update_form_data(FormField::Name, "Carlos M. Mendoza");
        store.save_driver().unwrap();
        settle(&mut store);

        assert_eq!(store.records()[0], DriverRecord::new(1, "Carlos M. Mendoza", "12345678"));
        assert_eq!(store.records().len(), 2);
        assert!(store.editing().is_none());
    }

    #[test]
    fn test_edit_cannot_take_another_identification() {
        let mut store = DriverStore::with_records(seed(), Latency::none());
        let carlos = store.find(1).cloned().unwrap();
        store.open_edit_modal(&carlos);
        store.update_form_data(FormField::Identification, "87654321");
        assert!(matches!(
            store.save_driver(),
            Err(StoreError::DuplicateIdentification { .. })
        ));
        assert_eq!(store.records(), seed().as_slice());
    }

    #[test]
    fn test_duplicate_check_is_case_sensitive() {
        let mut store =
            DriverStore::with_records(vec![DriverRecord::new(1, "A", "ab12")], Latency::none());
        store.open_create_modal();
        store.update_form_data(FormField::Name, "B");
        store.update_form_data(FormField::Identification, "AB12");
        assert!(store.save_driver().is_ok());
    }

    #[test]
    fn test_second_save_while_pending_is_rejected() {
        let t0 = Instant::now();
        let mut store = DriverStore::with_records(seed(), Latency::default());
        store.open_create_modal();
        store.update_form_data(FormField::Name, "Ana");
        store.update_form_data(FormField::Identification, "5555");
        store.save_driver_at(t0).unwrap();
        assert_eq!(store.save_driver_at(t0), Err(StoreError::SaveInFlight));

        assert!(store.poll(t0 + Duration::from_millis(100)).is_empty());
        assert_eq!(store.records().len(), 2);
        let done = store.poll(t0 + Duration::from_millis(500));
        assert_eq!(done.len(), 1);
        assert_eq!(store.records().len(), 3);
    }

    #[test]
    fn test_delete_without_target_or_while_pending_is_noop() {
        let t0 = Instant::now();
        let mut store = DriverStore::with_records(seed(), Latency::default());
        assert!(!store.confirm_delete_driver_at(t0));

        let maria = store.find(2).cloned().unwrap();
        store.open_delete_modal(&maria);
        assert!(store.confirm_delete_driver_at(t0));
        assert!(store.is_deleting());
        assert!(!store.confirm_delete_driver_at(t0));

        assert!(store.poll(t0 + Duration::from_millis(999)).is_empty());
        let done = store.poll(t0 + Duration::from_millis(1000));
        assert_eq!(done, vec![Completion::Deleted(maria)]);
        assert!(!store.is_deleting());
    }

    #[test]
    fn test_search_resets_to_first_page() {
        let mut store = DriverStore::with_records(numbered(12), Latency::none());
        store.set_page(3);
        assert_eq!(store.pagination().current_page, 3);
        store.set_search_term("driver");
        assert_eq!(store.cursor().page, 1);
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut store = DriverStore::with_records(numbered(12), Latency::none());
        store.set_page(2);
        store.set_items_per_page(10);
        assert_eq!(store.cursor(), PageCursor { page: 1, items_per_page: 10 });
        assert_eq!(store.paginated_records().len(), 10);
    }

    #[test]
    fn test_paginated_view_slices_filtered_records() {
        let mut store = DriverStore::with_records(numbered(23), Latency::none());
        store.set_search_term("driver 1");
        // Driver 1, 10..=19
        let filtered = store.filtered_records();
        assert_eq!(filtered.len(), 11);
        store.set_page(3);
        assert_eq!(store.paginated_records(), filtered[10..11].to_vec());
    }

    #[test]
    fn test_delete_of_last_item_on_page_moves_back() {
        let mut store = DriverStore::with_records(numbered(6), Latency::none());
        store.set_page(2);
        let last = store.paginated_records()[0].clone();
        store.open_delete_modal(&last);
        assert!(store.confirm_delete_driver());
        settle(&mut store);
        assert_eq!(store.cursor().page, 1);
        assert_eq!(store.pagination().total_pages, 1);
        assert_eq!(store.records().len(), 5);
    }

    #[test]
    fn test_deleting_only_record_lands_on_page_one() {
        let mut store = DriverStore::with_records(numbered(1), Latency::none());
        let only = store.find(1).cloned().unwrap();
        store.open_delete_modal(&only);
        store.confirm_delete_driver();
        settle(&mut store);
        assert!(store.records().is_empty());
        assert_eq!(store.pagination().current_page, 1);
    }

    #[test]
    fn test_paging_helpers_stay_in_range() {
        let mut store = DriverStore::with_records(numbered(11), Latency::none());
        store.prev_page();
        assert_eq!(store.cursor().page, 1);
        for _ in 0..3 {
            store.next_page();
        }
        assert_eq!(store.cursor().page, 3);
        store.prev_page();
        assert_eq!(store.cursor().page, 2);
    }

    #[test]
    fn test_statistics_follow_total() {
        let store = DriverStore::with_records(numbered(10), Latency::none());
        assert_eq!(
            store.statistics(),
            DriverStatistics {
                total_drivers: 10,
                active_drivers: 10,
                new_this_month: 3
            }
        );
        assert_eq!(DriverStatistics::from_total(3).new_this_month, 0);
    }

    #[test]
    fn test_closing_dialogs_clears_transient_state() {
        let mut store = DriverStore::with_records(seed(), Latency::none());
        let maria = store.find(2).cloned().unwrap();
        store.open_edit_modal(&maria);
        store.close_modal();
        assert!(!store.is_dialog_open());
        assert!(store.editing().is_none());
        assert_eq!(store.form(), &DriverForm::default());

        store.open_delete_modal(&maria);
        store.close_delete_modal();
        assert!(!store.is_delete_modal_open());
        assert!(!store.confirm_delete_driver());
    }
}
