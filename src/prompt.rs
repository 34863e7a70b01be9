/// Instruction sent with the uploaded image to the describe endpoint.
pub const DESCRIBE_INSTRUCTION: &str = "Describe the person in the image in detail but focus on \
their features and details in a way that could be used to replicate only the person in an image \
generation model and make sure that it is concise.";

/// Fixed description of the first person. Always ends with the marker that
/// introduces the second person.
pub const PERSONA_TEMPLATE: &str = "make sure it is hyperrealistic, two people generated together, \
the first one is a young woman that has a symmetrical and delicate face with a warm, sun-kissed \
complexion. Her eyebrows are well-defined, light brown, and slightly arched. Her eyes are large, \
light blue, and have a wide-set appearance. They are enhanced with a black winged eyeliner, brown \
eyeshadow on the crease, and long, full eyelashes. Her nose is narrow and straight, with a slightly \
upturned tip. Her lips are full and have a prominent cupid's bow, covered in a glossy, light brown \
or nude-pink lipstick. She has high, defined cheekbones with a soft pink blush. Her chin is pointed. \
Her hair is a warm, light blonde with highlights, styled in a loose wave with a side part. \
the second person is ";

const SETTING_MARKER: &str = " the setting is / they are doing: ";

/// Builds the image prompt from the persona template.
///
/// Precedence: description and user prompt, then user prompt alone, then
/// description alone, then the bare template. Empty strings count as absent.
pub fn compose_prompt(description: Option<&str>, user_prompt: Option<&str>) -> String {
    let description = description.filter(|s| !s.is_empty());
    let user_prompt = user_prompt.filter(|s| !s.is_empty());

    let mut prompt = String::from(PERSONA_TEMPLATE);
    match (description, user_prompt) {
        (Some(description), Some(user_prompt)) => {
            prompt.push_str(description);
            prompt.push_str(SETTING_MARKER);
            prompt.push_str(user_prompt);
        }
        (None, Some(user_prompt)) => {
            prompt.push_str("She is ");
            prompt.push_str(user_prompt);
            prompt.push('.');
        }
        (Some(description), None) => {
            prompt.push_str("She is ");
            prompt.push_str(description);
            prompt.push('.');
        }
        (None, None) => {}
    }
    prompt
}
