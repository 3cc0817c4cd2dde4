use serde::{Deserialize, Serialize};

/// A staff member as resolved by the attendance backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffRecord {
    pub staff_id: String,
    pub national_id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    /// Server-relative path of the staff photo, e.g. `/uploads/stf001.jpg`
    #[serde(default)]
    pub photo_path: Option<String>,
}

impl StaffRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .take(1)
            .chain(self.last_name.chars().take(1))
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// Department for display, `N/A` when unset or blank.
    pub fn department_label(&self) -> &str {
        display_or_na(self.department.as_deref())
    }

    pub fn position_label(&self) -> &str {
        display_or_na(self.position.as_deref())
    }

    /// Absolute photo URL given the API base URL.
    ///
    /// Photos are served from the host root, so a trailing `/api` segment is stripped
    /// from the base before joining.
    pub fn photo_url(&self, api_base_url: &str) -> Option<String> {
        let path = self.photo_path.as_deref().filter(|p| !p.trim().is_empty())?;
        let base = api_base_url.trim_end_matches('/');
        let host = base.strip_suffix("/api").unwrap_or(base);
        if path.starts_with('/') {
            Some(format!("{host}{path}"))
        } else {
            Some(format!("{host}/{path}"))
        }
    }
}

fn display_or_na(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => "N/A",
    }
}
