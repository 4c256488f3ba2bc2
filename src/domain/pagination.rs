//! Offset pagination and sorting value types used by repositories.

/// Column a listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    Id,
    #[default]
    Nome,
    Email,
    Crm,
    Especialidade,
}

impl SortField {
    /// Parses a public sort key. Unknown keys yield `None`.
    pub fn parse(key: &str) -> Option<Self> {
        match key.trim() {
            "id" => Some(SortField::Id),
            "nome" => Some(SortField::Nome),
            "email" => Some(SortField::Email),
            "crm" => Some(SortField::Crm),
            "especialidade" => Some(SortField::Especialidade),
            _ => None,
        }
    }

    /// Database column backing this key.
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Nome => "nome",
            SortField::Email => "email",
            SortField::Crm => "crm",
            SortField::Especialidade => "especialidade",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn sql(&self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sort {
    pub field: SortField,
    pub direction: Direction,
}

impl Sort {
    /// Parses `field` or `field,asc|desc`.
    ///
    /// Never fails: an unknown field falls back to `nome`, an unknown
    /// direction to ascending.
    pub fn parse_lenient(raw: &str) -> Self {
        let mut parts = raw.split(',');
        let field = parts
            .next()
            .and_then(SortField::parse)
            .unwrap_or_default();
        let direction = match parts.next().map(|d| d.trim().to_ascii_lowercase()) {
            Some(d) if d == "desc" => Direction::Desc,
            _ => Direction::Asc,
        };

        Sort { field, direction }
    }
}

/// A zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: Sort,
}

impl PageRequest {
    pub const DEFAULT_SIZE: u32 = 10;
    pub const MAX_SIZE: u32 = 2000;

    pub fn new(page: u32, size: u32, sort: Sort) -> Self {
        Self { page, size, sort }
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: Self::DEFAULT_SIZE,
            sort: Sort::default(),
        }
    }
}

/// One page of results plus the total number of matching rows.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub request: PageRequest,
    pub total_elements: i64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: i64) -> Self {
        Self {
            content,
            request,
            total_elements,
        }
    }

    pub fn total_pages(&self) -> u32 {
        if self.request.size == 0 {
            return 1;
        }
        let size = i64::from(self.request.size);
        ((self.total_elements + size - 1) / size) as u32
    }

    pub fn is_first(&self) -> bool {
        self.request.page == 0
    }

    pub fn is_last(&self) -> bool {
        u64::from(self.request.page) + 1 >= u64::from(self.total_pages())
    }

    /// Converts every item, keeping the pagination metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            request: self.request,
            total_elements: self.total_elements,
        }
    }
}
