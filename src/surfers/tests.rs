#[cfg(test)]
mod tests {
    use crate::database::{InMemoryObservationStore, ObservationStore};
    use crate::surfers::{NewObservation, ObservationError, ObservationService};
    use crate::test_utils::{level_flow, upstream_down, MockConditions, UnavailableStore};
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    fn service(
        mocks: &MockConditions,
    ) -> (ObservationService, Arc<InMemoryObservationStore>) {
        let store = Arc::new(InMemoryObservationStore::new());
        let service = ObservationService::new(store.clone(), Arc::new(mocks.service()));
        (service, store)
    }

    #[tokio::test]
    async fn test_explicit_timestamp_is_kept() {
        let mocks = MockConditions::healthy();
        let (service, store) = service(&mocks);
        let at = Utc.with_ymd_and_hms(2025, 4, 17, 18, 15, 0).unwrap();

        let recorded = service
            .record(NewObservation {
                timestamp: Some(at),
                ..NewObservation::new(12)
            })
            .await
            .unwrap();

        assert_eq!(recorded.timestamp, at);
        assert_eq!(store.list_observations().await.unwrap(), vec![recorded]);
    }

    #[tokio::test]
    async fn test_missing_timestamp_is_stamped_now() {
        let mocks = MockConditions::healthy();
        let (service, _store) = service(&mocks);

        let before = Utc::now();
        let recorded = service.record(NewObservation::new(4)).await.unwrap();
        let after = Utc::now();

        assert!(recorded.timestamp >= before && recorded.timestamp <= after);
    }

    #[tokio::test]
    async fn test_negative_count_is_rejected() {
        let mocks = MockConditions::healthy();
        let (service, store) = service(&mocks);

        let result = service.record(NewObservation::new(-1)).await;

        assert!(matches!(result, Err(ObservationError::NegativeCount(-1))));
        assert!(store.is_empty().await);
        assert_eq!(mocks.weather.calls(), 0);
    }

    #[tokio::test]
    async fn test_zero_count_is_accepted() {
        let mocks = MockConditions::healthy();
        let (service, store) = service(&mocks);

        service.record(NewObservation::new(0)).await.unwrap();
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_conditions_are_attached() {
        let mocks = MockConditions::healthy();
        let (service, _store) = service(&mocks);

        let recorded = service.record(NewObservation::new(9)).await.unwrap();

        assert_eq!(recorded.count, 9);
        assert_eq!(recorded.air_temperature, Some(22.0));
        assert_eq!(recorded.weather_condition, Some(0));
        assert_eq!(recorded.water_temperature, Some(16.5));
        assert_eq!(recorded.water_level, Some(143.0));
        assert_eq!(recorded.water_flow, Some(9.5));
    }

    #[tokio::test]
    async fn test_unavailable_conditions_are_stored_as_absent() {
        let mocks = MockConditions::all_failing();
        let (service, store) = service(&mocks);

        let recorded = service.record(NewObservation::new(3)).await.unwrap();

        assert_eq!(recorded.air_temperature, None);
        assert_eq!(recorded.weather_condition, None);
        assert_eq!(recorded.water_temperature, None);
        assert_eq!(recorded.water_level, None);
        assert_eq!(recorded.water_flow, None);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_supplied_values_win() {
        let mocks = MockConditions::healthy();
        let (service, _store) = service(&mocks);

        let recorded = service
            .record(NewObservation {
                water_temperature: Some(12.0),
                water_level: Some(150.0),
                water_flow: Some(33.0),
                ..NewObservation::new(20)
            })
            .await
            .unwrap();

        assert_eq!(recorded.water_temperature, Some(12.0));
        assert_eq!(recorded.water_level, Some(150.0));
        assert_eq!(recorded.water_flow, Some(33.0));
        assert_eq!(mocks.water_temperature.calls(), 0);
        assert_eq!(mocks.water_level.calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_flow_is_filled_without_touching_level() {
        let mocks = MockConditions::healthy();
        mocks.water_level.set_value(level_flow(139.0, 12.0));
        let (service, _store) = service(&mocks);

        let recorded = service
            .record(NewObservation {
                water_level: Some(147.0),
                ..NewObservation::new(5)
            })
            .await
            .unwrap();

        assert_eq!(recorded.water_level, Some(147.0));
        assert_eq!(recorded.water_flow, Some(12.0));
    }

    #[tokio::test]
    async fn test_level_failure_keeps_supplied_level() {
        let mocks = MockConditions::healthy();
        mocks.water_level.set_error(upstream_down());
        let (service, _store) = service(&mocks);

        let recorded = service
            .record(NewObservation {
                water_level: Some(141.0),
                ..NewObservation::new(5)
            })
            .await
            .unwrap();

        assert_eq!(recorded.water_level, Some(141.0));
        assert_eq!(recorded.water_flow, None);
    }

    #[tokio::test]
    async fn test_store_failure_is_returned() {
        let mocks = MockConditions::healthy();
        let service = ObservationService::new(
            Arc::new(UnavailableStore),
            Arc::new(mocks.service()),
        );

        assert!(matches!(
            service.record(NewObservation::new(2)).await,
            Err(ObservationError::Store(_))
        ));
        assert!(matches!(service.list().await, Err(ObservationError::Store(_))));
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let mocks = MockConditions::healthy();
        let (service, _store) = service(&mocks);

        for (hour, count) in [(8, 1), (17, 2), (11, 3)] {
            service
                .record(NewObservation {
                    timestamp: Some(Utc.with_ymd_and_hms(2025, 6, 1, hour, 0, 0).unwrap()),
                    ..NewObservation::new(count)
                })
                .await
                .unwrap();
        }

        let counts: Vec<i32> = service
            .list()
            .await
            .unwrap()
            .iter()
            .map(|o| o.count)
            .collect();
        assert_eq!(counts, vec![2, 3, 1]);
    }

    #[test]
    fn test_new_observation_from_json() {
        let input: NewObservation =
            serde_json::from_str(r#"{"count": 7, "timestamp": "2025-04-17T20:43:04Z"}"#).unwrap();

        assert_eq!(input.count, 7);
        assert_eq!(
            input.timestamp,
            Some(Utc.with_ymd_and_hms(2025, 4, 17, 20, 43, 4).unwrap())
        );
        assert_eq!(input.water_level, None);
    }
}
