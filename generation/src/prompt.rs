//! Grounding prompt construction.

/// Build the retrieval-QA prompt from the retrieved passages and the
/// question.
///
/// The model is instructed to answer only from the supplied context and to
/// admit ignorance otherwise, which keeps answers anchored to the
/// knowledge text instead of the model's own priors.
pub fn build_grounded_prompt(question: &str, context: &[String]) -> String {
    let context_block = context.join("\n\n");
    format!(
        "Use the following pieces of context to answer the question at the end. \
If you don't know the answer, just say that you don't know, don't try to make \
up an answer.\n\n{context_block}\n\nQuestion: {question}\nHelpful Answer:"
    )
}
