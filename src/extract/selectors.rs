//! Structural anchors of the rendered public profile page

pub const NAME: &str = ".top-card-layout h1.top-card-layout__title";
pub const HEADLINE: &str = ".top-card-layout h2.top-card-layout__headline";
pub const SUMMARY: &str = "section[data-section=summary] p";

pub const EXPERIENCE_ITEMS: &str = "ul.experience__list > li";
pub const EDUCATION_ITEMS: &str = "ul.education__list > li";
pub const PROJECT_ITEMS: &str = "ul.projects__list > li";
pub const CERTIFICATION_ITEMS: &str = "section[data-section=certifications] ul li";

/// Class token marking an experience item as a company group
pub const GROUP_MARKER: &str = "experience-group";
pub const GROUP_POSITIONS: &str = "li";

pub const COMPANY: &str = ".profile-section-card__subtitle, .experience-item__subtitle";
pub const COMPANY_IMAGE: &str = "img";
pub const POSITION_TITLE: &str = ".profile-section-card__title, .experience-item__title";
pub const ITEM_LOCATION: &str = ".experience-item__location";
pub const GROUP_POSITION_LOCATION: &str = ".experience-group-position__location";
pub const META_ITEMS: &str = ".experience-item__meta-item";

pub const EDUCATION_TITLE: &str = "h3 > a";
pub const EDUCATION_SUBTITLE_PARTS: &str = "h4 > span";
pub const PROJECT_TITLE: &str = "div > h3";
pub const CERTIFICATION_TITLE: &str = "h3";
pub const CERTIFICATION_INSTITUTION: &str = "h4 > a";
pub const CERTIFICATION_IMAGE: &str = "img";
pub const CERTIFICATION_DATES: &str = "span > time";

pub const DATE_RANGE: &str = "span.date-range > time";
pub const DESCRIPTION_MORE: &str = "p.show-more-less-text__text--more";
pub const DESCRIPTION_LESS: &str = "p.show-more-less-text__text--less";

/// Lazy-loaded images keep their real URL here
pub const DELAYED_URL_ATTR: &str = "data-delayed-url";

/// Expand/collapse labels rendered inside description text
pub const AFFORDANCE_LABELS: &[&str] = &["Show more", "Show less"];
