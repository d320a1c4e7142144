//! Course domain models and parameters.

use chrono::{DateTime, Utc};

use crate::{
    model::course::{
        CourseDetailDto, CourseDto, CreateCourseDto, PaginatedCoursesDto, UpdateCourseDto,
    },
    server::{
        error::AppError,
        model::{curriculum::SectionWithLessons, resource::Resource},
        util::validate::{require_text, validate_url},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl CourseLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseLevel::Beginner => "beginner",
            CourseLevel::Intermediate => "intermediate",
            CourseLevel::Advanced => "advanced",
        }
    }

    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value.trim().to_lowercase().as_str() {
            "beginner" => Ok(CourseLevel::Beginner),
            "intermediate" => Ok(CourseLevel::Intermediate),
            "advanced" => Ok(CourseLevel::Advanced),
            other => Err(AppError::BadRequest(format!(
                "Invalid course level: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub category: String,
    pub level: String,
    pub price: f64,
    pub thumbnail_url: Option<String>,
    pub instructor_id: i32,
    pub is_published: bool,
    pub total_duration: i32,
    pub total_lessons: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Course {
    pub fn from_entity(entity: entity::course::Model) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            description: entity.description,
            category: entity.category,
            level: entity.level,
            price: entity.price,
            thumbnail_url: entity.thumbnail_url,
            instructor_id: entity.instructor_id,
            is_published: entity.is_published,
            total_duration: entity.total_duration,
            total_lessons: entity.total_lessons,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> CourseDto {
        CourseDto {
            id: self.id,
            title: self.title,
            description: self.description,
            category: self.category,
            level: self.level,
            price: self.price,
            thumbnail_url: self.thumbnail_url,
            instructor_id: self.instructor_id,
            is_published: self.is_published,
            total_duration: self.total_duration,
            total_lessons: self.total_lessons,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PaginatedCourses {
    pub courses: Vec<Course>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedCourses {
    pub fn into_dto(self) -> PaginatedCoursesDto {
        PaginatedCoursesDto {
            courses: self.courses.into_iter().map(Course::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

/// Catalog filters. Only published courses are ever listed.
#[derive(Debug, Clone, Default)]
pub struct CourseFilter {
    pub category: Option<String>,
    pub level: Option<String>,
    /// Substring matched against title or description.
    pub search: Option<String>,
}

/// A course with its curriculum tree and review summary.
#[derive(Debug, Clone)]
pub struct CourseDetail {
    pub course: Course,
    pub instructor_name: String,
    pub sections: Vec<SectionWithLessons>,
    pub resources: Vec<Resource>,
    pub learner_count: u64,
    pub average_rating: Option<f64>,
    pub review_count: u64,
}

impl CourseDetail {
    pub fn into_dto(self) -> CourseDetailDto {
        CourseDetailDto {
            course: self.course.into_dto(),
            instructor_name: self.instructor_name,
            sections: self
                .sections
                .into_iter()
                .map(SectionWithLessons::into_dto)
                .collect(),
            resources: self.resources.into_iter().map(Resource::into_dto).collect(),
            learner_count: self.learner_count,
            average_rating: self.average_rating,
            review_count: self.review_count,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateCourseParams {
    pub instructor_id: i32,
    pub title: String,
    pub description: String,
    pub category: String,
    pub level: CourseLevel,
    pub price: f64,
    pub thumbnail_url: Option<String>,
}

impl CreateCourseParams {
    pub fn from_dto(instructor_id: i32, dto: CreateCourseDto) -> Result<Self, AppError> {
        Ok(Self {
            instructor_id,
            title: require_text("Title", &dto.title)?,
            description: require_text("Description", &dto.description)?,
            category: require_text("Category", &dto.category)?.to_lowercase(),
            level: dto
                .level
                .as_deref()
                .map(CourseLevel::parse)
                .transpose()?
                .unwrap_or(CourseLevel::Beginner),
            price: validate_price(dto.price.unwrap_or(0.0))?,
            thumbnail_url: dto.thumbnail_url.map(|u| validate_url(&u)).transpose()?,
        })
    }
}

/// Partial course update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateCourseParams {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub level: Option<CourseLevel>,
    pub price: Option<f64>,
    pub thumbnail_url: Option<String>,
}

impl UpdateCourseParams {
    pub fn from_dto(dto: UpdateCourseDto) -> Result<Self, AppError> {
        Ok(Self {
            title: dto.title.map(|t| require_text("Title", &t)).transpose()?,
            description: dto
                .description
                .map(|d| require_text("Description", &d))
                .transpose()?,
            category: dto
                .category
                .map(|c| require_text("Category", &c).map(|c| c.to_lowercase()))
                .transpose()?,
            level: dto.level.as_deref().map(CourseLevel::parse).transpose()?,
            price: dto.price.map(validate_price).transpose()?,
            thumbnail_url: dto.thumbnail_url.map(|u| validate_url(&u)).transpose()?,
        })
    }
}

fn validate_price(price: f64) -> Result<f64, AppError> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::BadRequest(
            "Price must be zero or greater".to_string(),
        ));
    }
    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_dto() -> CreateCourseDto {
        CreateCourseDto {
            title: " Rust Basics ".to_string(),
            description: "Ownership and borrowing".to_string(),
            category: "Programming".to_string(),
            level: None,
            price: None,
            thumbnail_url: None,
        }
    }

    #[test]
    fn defaults_level_and_price() {
        let params = CreateCourseParams::from_dto(1, create_dto()).unwrap();

        assert_eq!(params.title, "Rust Basics");
        assert_eq!(params.category, "programming");
        assert_eq!(params.level, CourseLevel::Beginner);
        assert_eq!(params.price, 0.0);
    }

    #[test]
    fn rejects_negative_price() {
        let mut dto = create_dto();
        dto.price = Some(-1.0);

        assert!(matches!(
            CreateCourseParams::from_dto(1, dto),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn rejects_unknown_level() {
        let mut dto = create_dto();
        dto.level = Some("expert".to_string());

        assert!(CreateCourseParams::from_dto(1, dto).is_err());
    }
}
