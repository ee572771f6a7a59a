use crate::error::{GuildError, Result};
use crate::paths;
use crate::types::{MembershipStatus, MembershipTier, PointBucket};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// Member
// ---------------------------------------------------------------------------

/// A club member profile. `testing_points` is the contribution metric the
/// playtest-queue ranker reads; both running totals are maintained by the
/// points ledger (`points::award`), never written directly by callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub slug: String,
    pub display_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub tier: MembershipTier,
    pub status: MembershipStatus,
    pub membership_expiry: DateTime<Utc>,
    pub join_date: DateTime<Utc>,
    #[serde(default)]
    pub contribution_points: i64,
    #[serde(default)]
    pub testing_points: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Member {
    pub fn new(
        slug: impl Into<String>,
        display_name: impl Into<String>,
        email: impl Into<String>,
        tier: MembershipTier,
        membership_expiry: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            slug: slug.into(),
            display_name: display_name.into(),
            email: email.into(),
            avatar_url: None,
            tier,
            status: MembershipStatus::Active,
            membership_expiry,
            join_date: now,
            contribution_points: 0,
            testing_points: 0,
            created_at: now,
            updated_at: now,
        }
    }

    // ---------------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------------

    pub fn create(
        root: &Path,
        slug: impl Into<String>,
        display_name: impl Into<String>,
        email: impl Into<String>,
        tier: MembershipTier,
        membership_expiry: DateTime<Utc>,
    ) -> Result<Self> {
        let slug = slug.into();
        paths::validate_slug(&slug)?;

        let member_dir = paths::member_dir(root, &slug);
        if member_dir.exists() {
            return Err(GuildError::MemberExists(slug));
        }

        let member = Self::new(slug, display_name, email, tier, membership_expiry);
        member.save(root)?;
        Ok(member)
    }

    pub fn load(root: &Path, slug: &str) -> Result<Self> {
        let manifest = paths::member_manifest(root, slug);
        if !manifest.exists() {
            return Err(GuildError::MemberNotFound(slug.to_string()));
        }
        let data = std::fs::read_to_string(&manifest)?;
        let member: Member = serde_yaml::from_str(&data)?;
        Ok(member)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let manifest = paths::member_manifest(root, &self.slug);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&manifest, data.as_bytes())
    }

    pub fn list(root: &Path) -> Result<Vec<Self>> {
        let members_dir = root.join(paths::MEMBERS_DIR);
        if !members_dir.exists() {
            return Ok(Vec::new());
        }

        let mut members = Vec::new();
        for entry in std::fs::read_dir(&members_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                let slug = entry.file_name().to_string_lossy().into_owned();
                match Self::load(root, &slug) {
                    Ok(m) => members.push(m),
                    Err(GuildError::MemberNotFound(_)) => {}
                    Err(e) => return Err(e),
                }
            }
        }
        members.sort_by(|a, b| a.join_date.cmp(&b.join_date));
        Ok(members)
    }

    // ---------------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------------

    pub fn set_tier(&mut self, tier: MembershipTier) {
        self.tier = tier;
        self.updated_at = Utc::now();
    }

    /// Extend the membership and reactivate an expired or pending profile.
    pub fn renew(&mut self, until: DateTime<Utc>) {
        self.membership_expiry = until;
        self.status = MembershipStatus::Active;
        self.updated_at = Utc::now();
    }

    pub fn mark_expired(&mut self) {
        self.status = MembershipStatus::Expired;
        self.updated_at = Utc::now();
    }

    /// Credit points to the appropriate running total.
    pub fn add_points(&mut self, bucket: PointBucket, points: i64) {
        match bucket {
            PointBucket::Testing => self.testing_points += points,
            PointBucket::Contribution => self.contribution_points += points,
        }
        self.updated_at = Utc::now();
    }

    pub fn total_points(&self) -> i64 {
        self.testing_points + self.contribution_points
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn expiry() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn member_create_load() {
        let dir = TempDir::new().unwrap();

        let member = Member::create(
            dir.path(),
            "sari",
            "Sari Utama",
            "sari@example.com",
            MembershipTier::Premium,
            expiry(),
        )
        .unwrap();
        assert_eq!(member.tier, MembershipTier::Premium);
        assert_eq!(member.testing_points, 0);

        let loaded = Member::load(dir.path(), "sari").unwrap();
        assert_eq!(loaded.display_name, "Sari Utama");
        assert_eq!(loaded.status, MembershipStatus::Active);
    }

    #[test]
    fn member_create_duplicate_fails() {
        let dir = TempDir::new().unwrap();
        Member::create(
            dir.path(),
            "budi",
            "Budi",
            "budi@example.com",
            MembershipTier::Basic,
            expiry(),
        )
        .unwrap();
        assert!(matches!(
            Member::create(
                dir.path(),
                "budi",
                "Budi Again",
                "budi2@example.com",
                MembershipTier::Basic,
                expiry(),
            ),
            Err(GuildError::MemberExists(_))
        ));
    }

    #[test]
    fn member_not_found() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Member::load(dir.path(), "ghost"),
            Err(GuildError::MemberNotFound(_))
        ));
    }

    #[test]
    fn points_feed_correct_totals() {
        let mut member = Member::new(
            "citra",
            "Citra",
            "citra@example.com",
            MembershipTier::Basic,
            expiry(),
        );
        member.add_points(PointBucket::Testing, 10);
        member.add_points(PointBucket::Contribution, 15);
        member.add_points(PointBucket::Testing, 5);

        assert_eq!(member.testing_points, 15);
        assert_eq!(member.contribution_points, 15);
        assert_eq!(member.total_points(), 30);
    }

    #[test]
    fn renew_reactivates() {
        let mut member = Member::new(
            "dewi",
            "Dewi",
            "dewi@example.com",
            MembershipTier::Basic,
            expiry(),
        );
        member.mark_expired();
        assert_eq!(member.status, MembershipStatus::Expired);

        let until = Utc.with_ymd_and_hms(2028, 1, 1, 0, 0, 0).unwrap();
        member.renew(until);
        assert_eq!(member.status, MembershipStatus::Active);
        assert_eq!(member.membership_expiry, until);
    }

    #[test]
    fn list_sorted_by_join_date() {
        let dir = TempDir::new().unwrap();
        Member::create(
            dir.path(),
            "first",
            "First",
            "first@example.com",
            MembershipTier::Basic,
            expiry(),
        )
        .unwrap();
        Member::create(
            dir.path(),
            "second",
            "Second",
            "second@example.com",
            MembershipTier::Premium,
            expiry(),
        )
        .unwrap();

        let members = Member::list(dir.path()).unwrap();
        assert_eq!(members.len(), 2);
        assert!(members[0].join_date <= members[1].join_date);
    }

    #[test]
    fn invalid_slug_rejected() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Member::create(
                dir.path(),
                "Not A Slug",
                "X",
                "x@example.com",
                MembershipTier::Basic,
                expiry(),
            ),
            Err(GuildError::InvalidSlug(_))
        ));
    }
}
