//! Command handlers organized by resource kind.
//!
//! | Module | Commands | Resource |
//! |--------|----------|----------|
//! | `collection` | `Dump`, `List`, `Get`, `Append`, `Update`, `Remove` | arrays of records |
//! | `singleton` | `SingletonGet`, `SingletonMerge` | `websiteStats` |
//! | `application` | `SubmitApplication` | `jobApplications` form |

pub mod application;
pub mod collection;
pub mod singleton;
