/*!
# Survey Studio

Survey authoring, response collection and results export, built in Rust.

## Overview

Users build a survey (title, description, button shape, theme color, font,
cover image, deadline, visibility and a list of questions), publish it, and
later view every respondent's answers as a grid that can be downloaded as an
Excel workbook.

## Architecture

### Authoring Layer
- **Draft model** - `SurveyDraft` plus the `QuestionDraft` sum type over the
  four question kinds (multiple choice, checkbox, dropdown, subjective)
- **Authoring session** - owns the draft, toggles the style/problem views,
  adds questions and submits the draft as a multipart payload

### Rendering Layer
- **Response inputs** - track one respondent's selection per question
- **Renderers** - handlebars HTML for every question kind, interactive or
  read-only

### Results Layer
- **Result grid** - date column plus `Q1`, `Q2`, ... columns, one row per respondent
- **Workbook export** - rust_xlsxwriter rendering and a client-side export
  session that releases its staged download after a fixed delay

### Backend Layer
- **Store** - JSON survey index, gzip-compressed bincode response logs, cover images
- **Server** - axum routes for creation, responses, results and export

## Modules

- **question**: draft question kinds and choice editing
- **answer**: server-side question data, answers and answer lists
- **draft**: survey draft, style enums, theme palette
- **form**: multipart payload built from a draft
- **authoring**: the authoring page session
- **selection**: interactive answer capture
- **render**: HTML rendering of questions
- **results**: result grid projection
- **downloader**: CSV and XLSX export
- **export**: client-side export flow
- **api**: backend trait with HTTP and in-process implementations
- **store**: on-disk persistence
- **app**: routing and handlers (feature `web`)
- **config**: environment configuration for the binaries

## REST API Endpoints

- `POST /api/surveys` - Creates a survey from a multipart form
- `GET /api/surveys` - Lists surveys, optionally `?userId=`
- `GET /api/surveys/{id}` - Survey detail with questions
- `POST /api/surveys/{id}/responses` - Records one respondent's answers
- `GET /api/surveys/{id}/results` - Header plus answer rows
- `GET /api/surveys/{id}/grid` - Result grid columns and rows
- `GET /api/surveys/{id}/excel` - Results workbook
*/

pub mod answer;
pub mod api;
#[cfg(feature = "web")]
pub mod app;
pub mod authoring;
pub mod config;
pub mod downloader;
pub mod draft;
pub mod error;
pub mod export;
pub mod form;
pub mod question;
pub mod render;
pub mod results;
pub mod selection;
pub mod store;

/// Re-export the most used types at the crate root
pub use answer::*;
pub use api::*;
pub use authoring::*;
pub use draft::*;
pub use error::*;
pub use question::*;
pub use results::*;
pub use selection::*;
