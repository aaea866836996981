use crate::models::profile::{AvailabilityStatus, Profile};
use crate::models::project::Project;

/// Cheap pre-screen run before scoring.
///
/// A profile is out when it is unavailable, or when the project needs presence,
/// the profile refuses remote work and its country is not one the project accepts.
/// An empty country list accepts every country.
pub fn is_eligible(profile: &Profile, project: &Project) -> bool {
    if profile.availability.status == AvailabilityStatus::Unavailable {
        return false;
    }

    let wanted = &project.location;
    if wanted.is_remote() || profile.location.accepts_remote || wanted.countries.is_empty() {
        return true;
    }

    profile
        .location
        .country
        .as_deref()
        .is_some_and(|c| wanted.countries.iter().any(|w| w.eq_ignore_ascii_case(c)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::test_support::{profile_with, project_with};
    use crate::models::project::LocationType;

    fn onsite_in(countries: &[&str]) -> Project {
        project_with(|p| {
            p.location.location_type = LocationType::Onsite;
            p.location.countries = countries.iter().map(|c| c.to_string()).collect();
        })
    }

    #[test]
    fn test_available_profile_on_remote_project() {
        assert!(is_eligible(&profile_with(|_| {}), &project_with(|_| {})));
    }

    #[test]
    fn test_unavailable_profile_is_excluded() {
        let profile = profile_with(|p| p.availability.status = AvailabilityStatus::Unavailable);
        assert!(!is_eligible(&profile, &project_with(|_| {})));
    }

    #[test]
    fn test_remote_friendly_profile_passes_onsite_elsewhere() {
        assert!(is_eligible(&profile_with(|_| {}), &onsite_in(&["DE"])));
    }

    #[test]
    fn test_local_only_profile_outside_allowed_countries() {
        let profile = profile_with(|p| p.location.accepts_remote = false);
        assert!(!is_eligible(&profile, &onsite_in(&["DE", "FR"])));
        assert!(is_eligible(&profile, &onsite_in(&["de", "us"])));
    }

    #[test]
    fn test_local_only_profile_without_country() {
        let profile = profile_with(|p| {
            p.location.accepts_remote = false;
            p.location.country = None;
        });
        assert!(!is_eligible(&profile, &onsite_in(&["US"])));
        assert!(is_eligible(&profile, &onsite_in(&[])));
    }
}
