use crate::constants::MAX_DESCRIPTION_LENGTH;
use crate::error::{Result, ValidationError};
use crate::models::{non_blank, Film, FilmPatch, NewFilm};

use super::Registry;

/// Validated in-memory store of films
#[derive(Debug, Default)]
pub struct FilmRegistry {
    store: Registry<Film>,
}

impl FilmRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored film, in id order
    pub async fn list_all(&self) -> Vec<Film> {
        self.store.list_all().await
    }

    pub async fn count(&self) -> usize {
        self.store.len().await
    }

    /// Validate and store a new film
    ///
    /// Checks run in a fixed order: name, description, release date,
    /// duration. The first failing check is reported.
    pub async fn create(&self, new_film: NewFilm) -> Result<Film> {
        let name = match non_blank(new_film.name.as_deref()) {
            Some(name) => name.to_string(),
            None => {
                tracing::warn!("Rejected film: missing name");
                return Err(ValidationError::MissingName);
            }
        };

        if let Some(description) = &new_film.description {
            if !Film::validate_description(description) {
                tracing::warn!(
                    "Rejected film {:?}: description is {} characters",
                    name,
                    description.chars().count()
                );
                return Err(ValidationError::DescriptionTooLong {
                    max: MAX_DESCRIPTION_LENGTH,
                });
            }
        }

        let release_date = new_film.release_date.ok_or_else(|| {
            tracing::warn!("Rejected film {:?}: missing release date", name);
            ValidationError::MissingReleaseDate
        })?;
        if !Film::validate_release_date(release_date) {
            tracing::warn!("Rejected film {:?}: release date = {}", name, release_date);
            return Err(ValidationError::ReleaseDateTooEarly {
                epoch: Film::cinema_epoch(),
            });
        }

        let duration = new_film.duration.ok_or_else(|| {
            tracing::warn!("Rejected film {:?}: missing duration", name);
            ValidationError::MissingDuration
        })?;
        if !Film::validate_duration(duration) {
            tracing::warn!(
                "Rejected film {:?}: duration = {} minutes",
                name,
                duration.num_minutes()
            );
            return Err(ValidationError::NonPositiveDuration);
        }

        let film = self
            .store
            .insert_with(|id| Film {
                id,
                name,
                description: new_film.description,
                release_date,
                duration,
            })
            .await;

        tracing::info!("Film {} added: {:?}", film.id, film.name);
        Ok(film)
    }

    /// Overwrite the supplied fields of an existing film
    ///
    /// Blank names and descriptions and non-positive durations in the patch
    /// are ignored rather than rejected.
    pub async fn update(&self, patch: FilmPatch) -> Result<Film> {
        let id = patch.id.ok_or_else(|| {
            tracing::warn!("Rejected film update: missing id");
            ValidationError::MissingId
        })?;

        let updated = self
            .store
            .modify(id, |film| {
                if let Some(name) = non_blank(patch.name.as_deref()) {
                    film.name = name.to_string();
                }
                if let Some(description) = non_blank(patch.description.as_deref()) {
                    film.description = Some(description.to_string());
                }
                if let Some(release_date) = patch.release_date {
                    film.release_date = release_date;
                }
                if let Some(duration) = patch.duration.filter(|d| Film::validate_duration(*d)) {
                    film.duration = duration;
                }
            })
            .await;

        match updated {
            Some(film) => {
                tracing::debug!("Film {} updated", film.id);
                Ok(film)
            }
            None => {
                tracing::warn!("Rejected film update: unknown id {}", id);
                Err(ValidationError::FilmNotFound(id))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeDelta};
    use std::sync::Arc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn valid_film() -> NewFilm {
        NewFilm {
            name: Some("The Kid".to_string()),
            description: Some("Chaplin's first full-length feature".to_string()),
            release_date: Some(date(1921, 2, 6)),
            duration: Some(TimeDelta::minutes(68)),
        }
    }

    #[tokio::test]
    async fn test_list_all_empty() {
        let registry = FilmRegistry::new();
        assert!(registry.list_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let registry = FilmRegistry::new();

        let first = registry.create(valid_film()).await.unwrap();
        let second = registry.create(valid_film()).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(registry.list_all().await, vec![first, second]);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let registry = FilmRegistry::new();

        for name in [None, Some("".to_string()), Some("  ".to_string())] {
            let film = NewFilm {
                name,
                ..valid_film()
            };
            assert_eq!(
                registry.create(film).await,
                Err(ValidationError::MissingName)
            );
        }
        assert_eq!(registry.count().await, 0);
    }

    #[tokio::test]
    async fn test_create_description_length_boundary() {
        let registry = FilmRegistry::new();

        let ok = NewFilm {
            description: Some("d".repeat(200)),
            ..valid_film()
        };
        assert!(registry.create(ok).await.is_ok());

        let too_long = NewFilm {
            description: Some("d".repeat(201)),
            ..valid_film()
        };
        assert_eq!(
            registry.create(too_long).await,
            Err(ValidationError::DescriptionTooLong { max: 200 })
        );
    }

    #[tokio::test]
    async fn test_create_without_description() {
        let registry = FilmRegistry::new();
        let film = NewFilm {
            description: None,
            ..valid_film()
        };

        let created = registry.create(film).await.unwrap();
        assert!(created.description.is_none());
    }

    #[tokio::test]
    async fn test_create_release_date_boundary() {
        let registry = FilmRegistry::new();

        let on_epoch = NewFilm {
            release_date: Some(date(1895, 12, 28)),
            ..valid_film()
        };
        assert!(registry.create(on_epoch).await.is_ok());

        let day_before = NewFilm {
            release_date: Some(date(1895, 12, 27)),
            ..valid_film()
        };
        assert_eq!(
            registry.create(day_before).await,
            Err(ValidationError::ReleaseDateTooEarly {
                epoch: date(1895, 12, 28)
            })
        );

        let missing = NewFilm {
            release_date: None,
            ..valid_film()
        };
        assert_eq!(
            registry.create(missing).await,
            Err(ValidationError::MissingReleaseDate)
        );
    }

    #[tokio::test]
    async fn test_create_duration_boundary() {
        let registry = FilmRegistry::new();

        let zero = NewFilm {
            duration: Some(TimeDelta::zero()),
            ..valid_film()
        };
        assert_eq!(
            registry.create(zero).await,
            Err(ValidationError::NonPositiveDuration)
        );

        let one = NewFilm {
            duration: Some(TimeDelta::minutes(1)),
            ..valid_film()
        };
        assert!(registry.create(one).await.is_ok());

        let missing = NewFilm {
            duration: None,
            ..valid_film()
        };
        assert_eq!(
            registry.create(missing).await,
            Err(ValidationError::MissingDuration)
        );
    }

    #[tokio::test]
    async fn test_create_reports_first_failure() {
        let registry = FilmRegistry::new();
        let film = NewFilm {
            name: None,
            description: Some("d".repeat(300)),
            release_date: Some(date(1800, 1, 1)),
            duration: Some(TimeDelta::zero()),
        };

        assert_eq!(
            registry.create(film).await,
            Err(ValidationError::MissingName)
        );
    }

    #[tokio::test]
    async fn test_update_requires_id() {
        let registry = FilmRegistry::new();
        assert_eq!(
            registry.update(FilmPatch::default()).await,
            Err(ValidationError::MissingId)
        );
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let registry = FilmRegistry::new();
        registry.create(valid_film()).await.unwrap();

        let patch = FilmPatch {
            id: Some(99),
            name: Some("Valid name".to_string()),
            ..Default::default()
        };
        assert_eq!(
            registry.update(patch).await,
            Err(ValidationError::FilmNotFound(99))
        );
    }

    #[tokio::test]
    async fn test_update_overwrites_supplied_fields_only() {
        let registry = FilmRegistry::new();
        let created = registry.create(valid_film()).await.unwrap();

        let patch = FilmPatch {
            id: Some(created.id),
            name: Some("The Kid (restored)".to_string()),
            duration: Some(TimeDelta::minutes(53)),
            ..Default::default()
        };
        let updated = registry.update(patch).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "The Kid (restored)");
        assert_eq!(updated.duration, TimeDelta::minutes(53));
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.release_date, created.release_date);
        assert_eq!(registry.list_all().await, vec![updated]);
    }

    #[tokio::test]
    async fn test_update_ignores_blank_and_non_positive_values() {
        let registry = FilmRegistry::new();
        let created = registry.create(valid_film()).await.unwrap();

        let patch = FilmPatch {
            id: Some(created.id),
            name: Some("   ".to_string()),
            description: Some("".to_string()),
            duration: Some(TimeDelta::minutes(-1)),
            release_date: None,
        };
        let updated = registry.update(patch).await.unwrap();

        assert_eq!(updated, created);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_get_distinct_sequential_ids() {
        const CREATES: u64 = 64;
        let registry = Arc::new(FilmRegistry::new());

        let handles: Vec<_> = (0..CREATES)
            .map(|_| {
                let registry = Arc::clone(&registry);
                tokio::spawn(async move { registry.create(valid_film()).await.unwrap().id })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();

        assert_eq!(ids, (1..=CREATES).collect::<Vec<_>>());
        assert_eq!(registry.count().await, CREATES as usize);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_readers_never_observe_partial_update() {
        let registry = Arc::new(FilmRegistry::new());
        let created = registry.create(valid_film()).await.unwrap();
        let id = created.id;

        // Each patch sets name and duration together; the pair must stay consistent.
        let pairs = [("Short cut", 40), ("Director's cut", 180)];

        let writer = {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move {
                for round in 0..500 {
                    let (name, minutes) = pairs[round % 2];
                    let patch = FilmPatch {
                        id: Some(id),
                        name: Some(name.to_string()),
                        duration: Some(TimeDelta::minutes(minutes)),
                        ..Default::default()
                    };
                    registry.update(patch).await.unwrap();
                    tokio::task::yield_now().await;
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                tokio::spawn(async move {
                    for _ in 0..500 {
                        for film in registry.list_all().await {
                            let minutes = film.duration.num_minutes();
                            let consistent = (film.name == "The Kid" && minutes == 68)
                                || pairs
                                    .iter()
                                    .any(|&(name, m)| film.name == name && minutes == m);
                            assert!(consistent, "torn record: {:?}", film);
                        }
                        tokio::task::yield_now().await;
                    }
                })
            })
            .collect();

        writer.await.unwrap();
        for reader in readers {
            reader.await.unwrap();
        }

        let films = registry.list_all().await;
        assert_eq!(films.len(), 1);
        assert_eq!(films[0].name, "Director's cut");
    }
}
