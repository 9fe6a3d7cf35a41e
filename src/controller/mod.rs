pub mod main_controller;
