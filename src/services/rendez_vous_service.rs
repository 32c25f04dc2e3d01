// src/services/rendez_vous_service.rs

use chrono::{Days, NaiveDate};
use uuid::Uuid;

use crate::{
    common::{
        calendar::{self, DateRange, RangeFilter},
        error::AppError,
    },
    db::{ClientRepository, RendezVousRepository},
    models::{
        auth::CurrentUser,
        rendez_vous::{CalendarDay, CalendarWeek, RdvStatut, RendezVousDetail, RendezVousPayload},
    },
    services::client_service::ensure_client_visible,
};

#[derive(Clone)]
pub struct RendezVousService {
    repo: RendezVousRepository,
    client_repo: ClientRepository,
}

impl RendezVousService {
    pub fn new(repo: RendezVousRepository, client_repo: ClientRepository) -> Self {
        Self { repo, client_repo }
    }

    /// Every appointment in the range, flagged with `is_mine` for the caller.
    pub async fn list(&self, user: &CurrentUser, filter: Option<RangeFilter>) -> Result<Vec<RendezVousDetail>, AppError> {
        let range = filter
            .map(|f| f.range_around(calendar::today()).ok_or_else(invalid_week))
            .transpose()?;
        self.list_in(user, range).await
    }

    /// Week view starting on the Monday of `week_start` (current week when
    /// absent).
    pub async fn calendar(&self, user: &CurrentUser, week_start: Option<NaiveDate>) -> Result<CalendarWeek, AppError> {
        let day = week_start.unwrap_or_else(calendar::today);
        let monday = calendar::week_start(day).ok_or_else(invalid_week)?;
        let range = DateRange::week(monday).ok_or_else(invalid_week)?;
        let mut week = empty_week(monday).ok_or_else(invalid_week)?;

        let rdvs = self.list_in(user, Some(range)).await?;
        fill_week(&mut week, rdvs);
        Ok(week)
    }

    async fn list_in(&self, user: &CurrentUser, range: Option<DateRange>) -> Result<Vec<RendezVousDetail>, AppError> {
        let mut rdvs = self.repo.list(range).await?;
        for rdv in &mut rdvs {
            rdv.is_mine = user.owns(rdv.rdv.user_id);
        }
        Ok(rdvs)
    }

    pub async fn create(&self, user: &CurrentUser, payload: RendezVousPayload) -> Result<Uuid, AppError> {
        ensure_client_visible(&self.client_repo, user, payload.client_id).await?;
        let input = payload.into_input().ok_or_else(invalid_date)?;

        let id = Uuid::new_v4();
        self.repo.insert(id, &input, user.id).await?;
        Ok(id)
    }

    pub async fn update(&self, user: &CurrentUser, id: Uuid, payload: RendezVousPayload) -> Result<(), AppError> {
        self.ensure_owned(user, id).await?;
        ensure_client_visible(&self.client_repo, user, payload.client_id).await?;
        let input = payload.into_input().ok_or_else(invalid_date)?;

        if self.repo.update(id, &input).await? == 0 {
            return Err(AppError::NotFound("Rendez-vous"));
        }
        Ok(())
    }

    pub async fn update_statut(&self, user: &CurrentUser, id: Uuid, statut: RdvStatut) -> Result<(), AppError> {
        self.ensure_owned(user, id).await?;

        if self.repo.update_statut(id, statut).await? == 0 {
            return Err(AppError::NotFound("Rendez-vous"));
        }
        Ok(())
    }

    pub async fn delete(&self, user: &CurrentUser, id: Uuid) -> Result<(), AppError> {
        self.ensure_owned(user, id).await?;

        if self.repo.delete(id).await? == 0 {
            return Err(AppError::NotFound("Rendez-vous"));
        }
        Ok(())
    }

    // Appointments shown as locked in the calendar cannot be changed either
    async fn ensure_owned(&self, user: &CurrentUser, id: Uuid) -> Result<(), AppError> {
        let owner = self
            .repo
            .find_owner(id)
            .await?
            .ok_or(AppError::NotFound("Rendez-vous"))?;

        if user.owns(owner) {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

fn invalid_week() -> AppError {
    AppError::BadRequest("Semaine invalide".to_string())
}

fn invalid_date() -> AppError {
    AppError::BadRequest("Date et heure du rendez-vous invalides".to_string())
}

/// Seven empty days from `monday`, with the neighbouring weeks. `None` when
/// one of those dates falls outside chrono's calendar.
pub fn empty_week(monday: NaiveDate) -> Option<CalendarWeek> {
    let days = (0..7)
        .map(|offset| {
            monday.checked_add_days(Days::new(offset)).map(|date| CalendarDay {
                date,
                rendez_vous: Vec::new(),
            })
        })
        .collect::<Option<Vec<_>>>()?;

    Some(CalendarWeek {
        week_start: monday,
        week_end: monday.checked_add_days(Days::new(6))?,
        previous_week: monday.checked_sub_days(Days::new(7))?,
        next_week: monday.checked_add_days(Days::new(7))?,
        days,
    })
}

/// Spreads appointments over the week's days, keeping time order. Anything
/// outside the week is dropped.
pub fn fill_week(week: &mut CalendarWeek, mut rdvs: Vec<RendezVousDetail>) {
    rdvs.sort_by_key(|r| r.rdv.date_heure);

    for rdv in rdvs {
        let offset = (rdv.rdv.date_heure.date() - week.week_start).num_days();
        if let Some(day) = usize::try_from(offset).ok().and_then(|i| week.days.get_mut(i)) {
            day.rendez_vous.push(rdv);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::rendez_vous::{RdvType, RendezVous};
    use chrono::{NaiveDateTime, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rdv_at(titre: &str, date_heure: NaiveDateTime) -> RendezVousDetail {
        RendezVousDetail {
            rdv: RendezVous {
                id: Uuid::new_v4(),
                client_id: Uuid::new_v4(),
                titre: titre.to_string(),
                description: None,
                date_heure,
                duree: 60,
                lieu: None,
                kind: RdvType::Reunion,
                statut: RdvStatut::Planifie,
                user_id: None,
                created_at: Utc::now(),
            },
            client_nom: None,
            client_prenom: None,
            entreprise: None,
            email: None,
            telephone: None,
            ville: None,
            code_postal: None,
            created_by_username: None,
            is_mine: false,
        }
    }

    #[test]
    fn week_has_seven_days_and_neighbours() {
        let week = empty_week(date(2025, 12, 1)).unwrap();

        assert_eq!(week.days.len(), 7);
        assert_eq!(week.days[0].date, date(2025, 12, 1));
        assert_eq!(week.days[6].date, date(2025, 12, 7));
        assert_eq!(week.week_end, date(2025, 12, 7));
        assert_eq!(week.previous_week, date(2025, 11, 24));
        assert_eq!(week.next_week, date(2025, 12, 8));
    }

    #[test]
    fn appointments_land_on_their_day_in_time_order() {
        let monday = date(2025, 12, 1);
        let rdvs = vec![
            rdv_at("fin d'après-midi", date(2025, 12, 3).and_hms_opt(17, 0, 0).unwrap()),
            rdv_at("matin", date(2025, 12, 3).and_hms_opt(9, 0, 0).unwrap()),
            rdv_at("dimanche soir", date(2025, 12, 7).and_hms_milli_opt(23, 59, 59, 999).unwrap()),
            rdv_at("lundi", date(2025, 12, 1).and_hms_opt(0, 0, 0).unwrap()),
        ];

        let mut week = empty_week(monday).unwrap();
        fill_week(&mut week, rdvs);

        let titles = |i: usize| -> Vec<&str> {
            week.days[i].rendez_vous.iter().map(|r| r.rdv.titre.as_str()).collect()
        };
        assert_eq!(titles(0), vec!["lundi"]);
        assert_eq!(titles(2), vec!["matin", "fin d'après-midi"]);
        assert_eq!(titles(6), vec!["dimanche soir"]);
        assert!(titles(1).is_empty());
    }

    #[test]
    fn appointments_outside_the_week_are_dropped() {
        let monday = date(2025, 12, 1);
        let rdvs = vec![
            rdv_at("avant", date(2025, 11, 30).and_hms_opt(10, 0, 0).unwrap()),
            rdv_at("après", date(2025, 12, 8).and_hms_opt(10, 0, 0).unwrap()),
        ];

        let mut week = empty_week(monday).unwrap();
        fill_week(&mut week, rdvs);
        assert!(week.days.iter().all(|d| d.rendez_vous.is_empty()));
    }

    #[test]
    fn weeks_at_the_calendar_edges_are_none() {
        assert!(empty_week(NaiveDate::MAX).is_none());
        let last_monday = calendar::week_start(NaiveDate::MAX).unwrap();
        assert!(empty_week(last_monday).is_none());
        assert!(empty_week(NaiveDate::MIN).is_none());
    }
}
