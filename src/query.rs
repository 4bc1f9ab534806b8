use uuid::Uuid;

/// One lookup for [`ProjectService`](crate::services::ProjectService): row
/// filter, optional ordering, result cap and relations to load eagerly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectQuery {
    pub filter: ProjectFilter,
    /// `None` leaves ordering to the store.
    pub order: Option<ProjectOrder>,
    /// Maximum number of rows; `0` means unlimited.
    pub limit: u32,
    pub relations: Vec<Relation>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectFilter {
    pub id: Option<Uuid>,
    pub completed: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectOrder {
    pub field: OrderField,
    pub direction: OrderDirection,
}

impl Default for ProjectOrder {
    fn default() -> Self {
        Self {
            field: OrderField::Completed,
            direction: OrderDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderField {
    Id,
    Name,
    Completed,
    CreatedAt,
    UpdatedAt,
}

impl OrderField {
    /// Unknown names fall back to `completed`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" => OrderField::Id,
            "name" => OrderField::Name,
            "created_at" | "createdat" => OrderField::CreatedAt,
            "updated_at" | "updatedat" => OrderField::UpdatedAt,
            _ => OrderField::Completed,
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            OrderField::Id => "id",
            OrderField::Name => "name",
            OrderField::Completed => "completed",
            OrderField::CreatedAt => "created_at",
            OrderField::UpdatedAt => "updated_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl OrderDirection {
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("desc") {
            OrderDirection::Desc
        } else {
            OrderDirection::Asc
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            OrderDirection::Asc => "ASC",
            OrderDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Author,
    Tasks,
    TaskStatus,
    TaskPriority,
    TaskAssignee,
    TaskAuthor,
}

impl ProjectQuery {
    pub fn includes(&self, relation: Relation) -> bool {
        self.relations.contains(&relation)
    }

    /// Tasks are loaded when requested directly or through any task relation.
    pub fn includes_tasks(&self) -> bool {
        self.relations.iter().any(|r| *r != Relation::Author)
    }
}

/// Numeric truthiness of a query-string value: a finite non-zero number is
/// `true`, while zero, blank and non-numeric input are `false`.
pub fn parse_truthy(s: &str) -> bool {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return false;
    }
    match trimmed.parse::<f64>() {
        Ok(n) => n.is_finite() && n != 0.0,
        Err(_) => false,
    }
}
