mod achievement;
mod ai;
mod course;
mod curriculum;
mod download;
mod enrollment;
mod resource;
mod review;
mod user;
