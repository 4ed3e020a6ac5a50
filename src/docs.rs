use crate::api::edit_request::{DecideEditRequest, SubmitEditRequest};
use crate::api::time_log::ManualEdit;
use crate::model::edit_request::{EditRequest, RequestStatus};
use crate::model::time_log::{PunchState, TimeLog};
use crate::timeclock::edit_request::{ManagerRequests, RequestView};
use crate::timeclock::manager_edit::PunchCorrection;
use crate::timeclock::provisioner::{ProvisionReport, RecomputeReport};
use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Punch Clock API",
        version = "1.0.0",
        description = r#"
## Employee Time Clock

Employees punch four times a day (entry, lunch exit, lunch return, exit); the
service derives extra and missing hours against each employee's weekly workload.

### Key Features
- **Punching**
  - Each punch fills the next free slot of today's log
- **Manager corrections**
  - Direct edits with recorded author, time and reason
- **Edit requests**
  - Employees ask for corrections, managers approve or reject once
- **Company isolation**
  - Managers only see and change records of their own company

### Security
Every endpoint requires a **JWT Bearer** token whose subject is the employee email.
"#,
    ),
    paths(
        crate::api::time_log::punch,
        crate::api::time_log::list_time_logs,
        crate::api::time_log::manual_edit,

        crate::api::edit_request::submit,
        crate::api::edit_request::list_mine,
        crate::api::edit_request::list_for_manager,
        crate::api::edit_request::decide,

        crate::api::admin::provision,
        crate::api::admin::recompute
    ),
    components(
        schemas(
            TimeLog,
            PunchState,
            PunchCorrection,
            ManualEdit,
            EditRequest,
            RequestStatus,
            SubmitEditRequest,
            DecideEditRequest,
            RequestView,
            ManagerRequests,
            ProvisionReport,
            RecomputeReport
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "TimeLog", description = "Punches and daily time logs"),
        (name = "EditRequest", description = "Correction requests and manager decisions"),
        (name = "Admin", description = "Operational triggers"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
