use tracing::{info, warn};

use crate::engine::fallback::fallback_package;
use crate::engine::gateway::Gateway;
use crate::engine::prompt_builder::PromptBuilder;
use crate::engine::response_parser::extract_json_object;
use crate::model::content_package::{ContentPackage, GeneratedPackage, PackageOrigin};
use crate::model::event_input::{EventInput, ValidationError};

/// Runs one marketing-package request.
///
/// Validation failures are returned before the gateway is touched. Past
/// that point the call always yields a package: gateway and parse failures
/// are logged and replaced by the fallback.
pub fn generate_package(
    gateway: &dyn Gateway,
    input: &EventInput,
) -> Result<GeneratedPackage, ValidationError> {
    input.validate()?;

    let prompt = PromptBuilder::marketing(input);
    info!(event = %input.event_name.trim(), "requesting marketing package");

    let text = match gateway.generate_text(&prompt) {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "generation failed, using fallback");
            return Ok(fallback(input, e.to_string()));
        }
    };

    match extract_json_object(&text) {
        Ok(object) => Ok(GeneratedPackage {
            package: ContentPackage::from_json_object(&object),
            origin: PackageOrigin::Generated,
        }),
        Err(e) => {
            let preview: String = text.chars().take(200).collect();
            warn!(error = %e, %preview, "unparsable response, using fallback");
            Ok(fallback(input, e.to_string()))
        }
    }
}

fn fallback(input: &EventInput, reason: String) -> GeneratedPackage {
    GeneratedPackage {
        package: fallback_package(input),
        origin: PackageOrigin::Fallback { reason },
    }
}
